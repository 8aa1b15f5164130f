#[derive(Debug)]
pub struct PaginatedList<T> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<T>,
}

#[derive(Debug)]
pub struct PropertyListOptions {
    pub limit: i64,
    pub offset: i64,
    /// When set, only listings with a matching availability flag.
    pub available: Option<bool>,
}
