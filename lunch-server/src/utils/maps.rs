//! Map link helper

/// Yandex-maps search URL for a venue address, optionally prefixed with
/// the venue name for a better pin match.
pub fn yandex_maps_url(address: &str, name: Option<&str>) -> String {
    let query = match name {
        Some(name) => format!("{name}, {address}"),
        None => address.to_string(),
    };
    format!("https://yandex.ru/maps/?text={}", urlencoding::encode(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_encoded() {
        let url = yandex_maps_url("Lenina 1", Some("Cafe Nord"));
        assert_eq!(
            url,
            "https://yandex.ru/maps/?text=Cafe%20Nord%2C%20Lenina%201"
        );
    }

    #[test]
    fn name_is_optional() {
        let url = yandex_maps_url("Lenina 1", None);
        assert!(url.ends_with("Lenina%201"));
    }
}
