// src/filter/defaults.rs
// =============================================================================
// Files we skip unless told otherwise: things that are binary, huge, or
// useless as text for a language model.
// =============================================================================

/// Default exclusion globs, matched case-insensitively against file names.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Images
    "*.png", "*.jpg", "*.jpeg", "*.gif", "*.bmp", "*.ico", "*.icns", "*.tif", "*.tiff",
    "*.webp", "*.psd", "*.heic",
    // Documents
    "*.pdf", "*.doc", "*.docx", "*.xls", "*.xlsx", "*.ppt", "*.pptx", "*.odt", "*.ods",
    // Archives
    "*.zip", "*.tar", "*.gz", "*.tgz", "*.bz2", "*.xz", "*.7z", "*.rar", "*.nupkg",
    // Executables and object code
    "*.exe", "*.dll", "*.so", "*.dylib", "*.msi", "*.bin", "*.o", "*.a", "*.lib",
    "*.obj", "*.pdb", "*.class", "*.jar", "*.pyc", "*.wasm",
    // Audio and video
    "*.mp3", "*.wav", "*.flac", "*.ogg", "*.m4a", "*.mp4", "*.avi", "*.mov", "*.mkv",
    "*.webm", "*.wmv",
    // Fonts
    "*.ttf", "*.otf", "*.woff", "*.woff2", "*.eot",
    // Misc binary data
    "*.dat", "*.db", "*.sqlite", "*.iso", "*.img", "*.dmg", "*.pfx", "*.p12",
];
