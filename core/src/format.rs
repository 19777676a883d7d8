//! Human-readable list formatting for creator credits.

/// Join `items` as an Oxford-comma list.
///
/// `[]` becomes `""`, `["a"]` becomes `"a"`, `["a", "b"]` becomes
/// `"a and b"`, and three or more end with `", and "`.
pub fn oxford_comma_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}
