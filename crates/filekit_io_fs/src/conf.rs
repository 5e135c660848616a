//! Filesystem constants and the extension -> MIME table.

/// Default chunk size for [`crate::read::read_chunked`] callers.
pub const N_CHUNK_SIZE_DEFAULT: usize = 1024;
/// Largest file [`crate::read::read_all_bytes`] will buffer eagerly.
pub const N_READ_ALL_BYTES_MAX: u64 = i32::MAX as u64 - 8;
/// Bytes sniffed from the head of a file when the extension is unknown.
pub const N_PROBE_PREFIX_BYTES: usize = 8192;
/// Longest extension looked up in [`TUP_MIME_BY_EXTENSION`].
pub const N_LEN_EXTENSION_MAX: usize = 16;
/// Terminator written after every line by [`crate::write::write_lines`].
pub const C_LINE_SEPARATOR: &str = "\n";

/// Lowercase extension -> MIME type.
pub const TUP_MIME_BY_EXTENSION: &[(&str, &str)] = &[
    // Text
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("log", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("xml", "application/xml"),
    ("json", "application/json"),
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("toml", "application/toml"),
    ("rtf", "application/rtf"),
    // Code
    ("rs", "text/x-rust"),
    ("py", "text/x-python"),
    ("java", "text/x-java"),
    ("c", "text/x-c"),
    ("h", "text/x-c"),
    ("cpp", "text/x-c++"),
    ("hpp", "text/x-c++"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("ts", "text/typescript"),
    ("sh", "application/x-sh"),
    ("sql", "application/sql"),
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("ico", "image/vnd.microsoft.icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    // Audio / video
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    // Documents
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    // Archives
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("7z", "application/x-7z-compressed"),
    ("xz", "application/x-xz"),
    ("zst", "application/zstd"),
    ("jar", "application/java-archive"),
];

/// Extensions treated as executable where the host has no execute bit.
pub const TUP_EXECUTABLE_EXTENSIONS: [&str; 5] = ["exe", "bat", "cmd", "com", "ps1"];
