mod pages;

pub use pages::NotionPagesClient;
