/// ` --compressed` when the request negotiated a content encoding.
pub fn generate_compress(is_encode: bool) -> &'static str {
    if is_encode {
        " --compressed"
    } else {
        ""
    }
}
