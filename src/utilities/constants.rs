pub const NETRUNNERDB_URL: &str = "http://netrunnerdb.com";
pub const CARD_API_PATH: &str = "/api/card";

pub const CARDS_DIR: &str = "cards";
pub const IMAGES_DIR: &str = "images";
pub const CARD_FILE_EXTENSION: &str = "card";
pub const IMAGE_FILE_EXTENSION: &str = "png";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
