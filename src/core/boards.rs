/// Boards listed on the index, in display order.
pub const KNOWN_BOARDS: &[&str] = &[
    "g", "v", "tv", "sp", "fa", "pol", "vg", "a", "b", "c", "d", "e", "f", "gif", "h", "hr", "k",
    "m", "o", "p", "r", "s", "t", "u", "vr", "w", "wg", "i", "ic", "r9k", "s4s", "vip", "cm",
    "hm", "lgbt", "y", "3", "aco", "adv", "an", "asp", "bant", "biz", "cgl", "ck", "co", "diy",
    "fit", "gd", "hc", "his", "int", "jp", "lit", "mlp", "mu", "n", "news", "out", "po", "qst",
    "sci", "soc", "tg", "toy", "trv", "vp", "wsg", "wsr", "x",
];

/// Normalizes user input like `/g/` or ` g ` to a bare board id.
pub fn normalize_board_id(raw: &str) -> String {
    raw.trim().trim_matches('/').to_string()
}

/// Display form of a board id, e.g. `/g/`.
pub fn board_label(board_id: &str) -> String {
    format!("/{board_id}/")
}
