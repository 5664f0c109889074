// Resume documents: upload, PDF text extraction, listing.

pub mod extract;
pub mod handlers;
