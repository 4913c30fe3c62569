/// True if the variable is set to anything other than the empty string.
pub fn env_var_non_empty(name: &str) -> bool {
    std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::env_var_non_empty;

    #[test]
    fn test_env_var_non_empty() {
        assert!(!env_var_non_empty("LOTBOOK_SURELY_UNSET_VAR_FOR_TEST"));
    }
}
