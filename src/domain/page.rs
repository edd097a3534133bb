use crate::domain::user::User;

/// One page of users plus the page cursor to request next.
///
/// A `next_page` of zero or below is the "no more pages" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagedUsers {
    pub users: Vec<User>,
    pub next_page: i32,
}

impl PagedUsers {
    pub fn new(users: Vec<User>, next_page: i32) -> Self {
        Self { users, next_page }
    }
}
