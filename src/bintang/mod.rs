mod crawler;

pub use crawler::{BintangCrawler, PRODUCT_PATH_MARKERS};

pub const SEED_URLS: [&str; 2] = [
    "https://www.bintangpasundan.com/home-produk/",
    "https://www.bintangpasundan.com/",
];
