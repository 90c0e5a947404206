pub const FORMAT_ERROR: &str = "format_error";
pub const READ_ERROR: &str = "read_error";
pub const INVALID_INPUT: &str = "invalid_input";
pub const INDEX_OUT_OF_RANGE: &str = "index_out_of_range";
pub const TOO_LARGE: &str = "too_large";
pub const INTERNAL_ERROR: &str = "internal_error";
