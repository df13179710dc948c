use chrono::{DateTime, Utc};

/// Post model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: i32,
}

/// A post that has not been inserted yet. The store stamps the timestamp.
#[derive(Clone, Debug)]
pub struct NewPost {
    pub body: String,
    pub author_id: i32,
}
