//! Domain constants

/// Category name of the text embedding capability
pub const CATEGORY_TEXT_EMBEDDING: &str = "text_embedding";

/// Category name of the image embedding capability
pub const CATEGORY_IMAGE_EMBEDDING: &str = "image_embedding";

/// Category name of the video embedding capability
pub const CATEGORY_VIDEO_EMBEDDING: &str = "video_embedding";

/// Category name of the speech recognition capability
pub const CATEGORY_ASR: &str = "asr";

/// Category name of the vision-language capability
pub const CATEGORY_VLM: &str = "vlm";

/// Category name of the search engine backend
pub const CATEGORY_SEARCH_ENGINE: &str = "search_engine";

/// Category name of the object storage backend
pub const CATEGORY_STORAGE: &str = "storage";

/// Every category, in the order they are registered at bootstrap
pub const ALL_CATEGORIES: [&str; 7] = [
    CATEGORY_TEXT_EMBEDDING,
    CATEGORY_IMAGE_EMBEDDING,
    CATEGORY_VIDEO_EMBEDDING,
    CATEGORY_ASR,
    CATEGORY_VLM,
    CATEGORY_SEARCH_ENGINE,
    CATEGORY_STORAGE,
];
