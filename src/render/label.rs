/// Split a display name into label lines.
///
/// A new fragment starts before every ASCII capital that is followed by a character other than
/// an ASCII capital, except at the very start. Runs of capitals stay together up to their last
/// letter, so `"TheGodfather"` gives `["The", "Godfather"]` and `"E.T."` gives `["E.", "T."]`.
/// Fragments are never empty (an empty name yields one empty fragment) and never split again.
pub fn split_name(name: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = name.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let Some(&(_, next)) = chars.peek() else {
            break;
        };
        if i > start && c.is_ascii_uppercase() && !next.is_ascii_uppercase() {
            out.push(&name[start..i]);
            start = i;
        }
    }
    out.push(&name[start..]);
    out
}
