mod tests {
    use pwm_fade::math::map_range;

    #[test]
    fn test_map_range_endpoints() {
        assert_eq!(map_range(0, 0, 100, 0, 1024), 0);
        assert_eq!(map_range(100, 0, 100, 0, 1024), 1024);
    }

    #[test]
    fn test_map_range_truncates_intermediate_values() {
        assert_eq!(map_range(50, 0, 100, 0, 1024), 512);
        assert_eq!(map_range(1, 0, 100, 0, 1024), 10);
        assert_eq!(map_range(99, 0, 100, 0, 1024), 1013);
    }

    #[test]
    fn test_map_range_with_offset_output() {
        assert_eq!(map_range(5, 0, 10, 100, 200), 150);
        assert_eq!(map_range(0, 0, 10, 100, 200), 100);
    }

    #[test]
    fn test_map_range_degenerate_input_range() {
        assert_eq!(map_range(7, 3, 3, 0, 1024), 0);
    }
}
