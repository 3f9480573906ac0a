/// State for each open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    /// Version reported by the client with the last full sync
    pub version: i32,
}
