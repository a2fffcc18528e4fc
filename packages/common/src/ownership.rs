use crate::id::UserId;
use crate::record::BlogRecord;

/// Whether `actor` may delete `record`.
///
/// Only the recorded owner may. A record with no owner cannot be deleted
/// by anyone through this check.
pub fn can_delete(actor: &UserId, record: &BlogRecord) -> bool {
    record.owner.as_ref() == Some(actor)
}
