#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub unread: bool,
}

impl Notice {
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            unread: true,
        }
    }
}
