#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    pub name: String,
    pub url: String,
    /// Distinct listeners who applied the tag.
    pub reach: u64,
    /// Total tag applications.
    pub taggings: u64,
}
