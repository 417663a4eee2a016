pub mod dashboard;
pub mod statistics;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        // Test that all route module constants are accessible
        assert_eq!(super::statistics::GET_STATISTICS, "get_statistics");
        assert_eq!(
            super::statistics::GET_USER_STATISTICS,
            "get_user_statistics"
        );
        assert_eq!(super::dashboard::GET_USER_DASHBOARD, "get_user_dashboard");
    }
}
