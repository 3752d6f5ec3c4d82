//! Chunked upload planning.

/// Size of one simulated upload chunk (1 MiB).
pub const CHUNK_SIZE_BYTES: u64 = 1024 * 1024;

/// Largest file accepted for a chunked upload (2 GiB).
pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Number of chunks for a file; at least one, even for empty files.
pub fn total_chunks(file_size_bytes: u64) -> u64 {
    file_size_bytes.div_ceil(CHUNK_SIZE_BYTES).max(1)
}

/// Progress after `completed` of `total` chunks, in percent.
pub fn progress_percent(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Whether a declared file size may be uploaded.
pub fn within_upload_limit(file_size_bytes: u64) -> bool {
    file_size_bytes <= MAX_UPLOAD_BYTES
}
