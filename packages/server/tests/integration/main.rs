
mod auth;
mod blogs;
mod users;
