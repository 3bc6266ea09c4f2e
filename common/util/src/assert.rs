/// Asserts that each of the `expected` strings appears in `content`, in the order given.
///
/// Each search starts where the previous match ended, so repeated entries must appear repeatedly.
#[macro_export]
macro_rules! assert_contains_inorder {
    ($content:expr, $expected:expr) => {{
        let content: &str = $content.as_ref();
        let mut remainder = content;
        for (index, expected) in $expected.iter().enumerate() {
            match remainder.find(expected) {
                Some(position) => remainder = &remainder[position + expected.len()..],
                None => panic!(
                    "expected content not found, or found out of order. index: {}, expected: {:?}, content: {:?}",
                    index, expected, content
                ),
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn in_order() {
        assert_contains_inorder!("one two three", ["one", "three"]);
    }

    #[test]
    #[should_panic]
    fn out_of_order() {
        assert_contains_inorder!("one two three", ["three", "one"]);
    }
}
