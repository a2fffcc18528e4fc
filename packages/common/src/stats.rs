//! Aggregations over a sequence of blog records.
//!
//! Every function accepts an empty slice. Where several candidates share the
//! maximum, the one encountered first in input order is returned; for the
//! author groupings that is the author whose first record appears earliest.
//!
//! Like sums are `u128`, which cannot overflow for any slice of `u64` likes.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::BlogRecord;

/// The author with the most records and how many they wrote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// The author whose records collected the most likes, and that total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u128,
}

/// All aggregations computed over one snapshot of records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogStats {
    pub total_likes: u128,
    pub favorite_blog: Option<BlogRecord>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

pub fn total_likes(records: &[BlogRecord]) -> u128 {
    records.iter().map(|r| u128::from(r.likes)).sum()
}

pub fn favorite_blog(records: &[BlogRecord]) -> Option<&BlogRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if record.likes <= current.likes => Some(current),
        _ => Some(record),
    })
}

pub fn most_blogs(records: &[BlogRecord]) -> Option<AuthorBlogs> {
    group_by_author(records, |_| 1usize)
        .into_iter()
        .fold(None, keep_first_max)
        .map(|(author, blogs)| AuthorBlogs {
            author: author.to_owned(),
            blogs,
        })
}

pub fn most_likes(records: &[BlogRecord]) -> Option<AuthorLikes> {
    group_by_author(records, |r| u128::from(r.likes))
        .into_iter()
        .fold(None, keep_first_max)
        .map(|(author, likes)| AuthorLikes {
            author: author.to_owned(),
            likes,
        })
}

/// Compute every aggregation at once.
pub fn summarize(records: &[BlogRecord]) -> BlogStats {
    BlogStats {
        total_likes: total_likes(records),
        favorite_blog: favorite_blog(records).cloned(),
        most_blogs: most_blogs(records),
        most_likes: most_likes(records),
    }
}

/// Sum `weight` per author, returning groups in order of first appearance.
fn group_by_author<W, F>(records: &[BlogRecord], weight: F) -> Vec<(&str, W)>
where
    W: Copy + std::ops::AddAssign,
    F: Fn(&BlogRecord) -> W,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, W)> = Vec::new();

    for record in records {
        let w = weight(record);
        match index.get(record.author.as_str()) {
            Some(&slot) => groups[slot].1 += w,
            None => {
                index.insert(record.author.as_str(), groups.len());
                groups.push((record.author.as_str(), w));
            }
        }
    }

    groups
}

fn keep_first_max<'a, W: PartialOrd>(
    best: Option<(&'a str, W)>,
    candidate: (&'a str, W),
) -> Option<(&'a str, W)> {
    match best {
        Some(current) if candidate.1 <= current.1 => Some(current),
        _ => Some(candidate),
    }
}
