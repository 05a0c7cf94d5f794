//! Helpers for keeping secrets out of the logs

/// Number of trailing characters left visible by [`mask_secret`]
pub const VISIBLE_SUFFIX: usize = 5;

/// Replace every character of `secret` but the last five with `*`
///
/// ```
/// use cryptobot_utils::mask_secret;
///
/// assert_eq!(mask_secret("123456:ABCDEFGH"), "**********DEFGH");
/// assert_eq!(mask_secret("abc"), "abc");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    let hidden = len.saturating_sub(VISIBLE_SUFFIX);

    secret
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}
