/// Asserts that each of the `expected` strings occurs in `content`, in the given order.
///
/// Occurrences may be separated by any other content.
#[macro_export]
macro_rules! assert_contains_inorder {
    ($content:expr, $expected:expr) => {{
        let content: &str = $content.as_ref();
        let mut remaining = content;
        for item in $expected.iter() {
            let item: &str = item.as_ref();
            match remaining.find(item) {
                Some(index) => remaining = &remaining[index + item.len()..],
                None => panic!(
                    "expected '{}' not found in order. content: '{}'",
                    item, content
                ),
            }
        }
    }};
}
