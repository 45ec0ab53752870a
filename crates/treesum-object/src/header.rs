use crate::ObjectType;

/// Write an object framing header: `"<type> <size>\0"`.
///
/// The size is the content byte length in ASCII decimal, no padding.
/// This header is fed to the hasher before the content itself; for blobs
/// the size comes from file metadata so content can be streamed afterwards.
pub fn write_header(obj_type: ObjectType, content_size: u64) -> Vec<u8> {
    format!("{} {}\0", obj_type, content_size).into_bytes()
}
