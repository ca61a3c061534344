use serde_json::Value as JsonValue;

/// Account roles, stored as text on `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// ADMIN and SUPER_ADMIN both clear the admin bar.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// Lifecycle states for an order, stored as text on `orders.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(OrderStatus::Pending),
            "PAID" => Some(OrderStatus::Paid),
            "SHIPPED" => Some(OrderStatus::Shipped),
            "COMPLETED" => Some(OrderStatus::Completed),
            "CANCELED" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// Forward-only lifecycle. Terminal states (COMPLETED, CANCELED) accept
    /// nothing; cancellation is allowed until the order ships.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid)
                | (Pending, Canceled)
                | (Paid, Shipped)
                | (Paid, Canceled)
                | (Shipped, Completed)
        )
    }
}

/// Decode the `products.specs` text column. The column holds free-form JSON
/// written by admins; malformed content reads as absent instead of failing
/// the request.
pub fn decode_specs(raw: Option<&str>) -> Option<JsonValue> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

pub fn encode_specs(specs: &JsonValue) -> String {
    specs.to_string()
}

/// Decode the `reviews.photos` text column, a JSON array of image names.
/// Anything that is not a valid string array reads as absent.
pub fn decode_photos(raw: Option<&str>) -> Option<Vec<String>> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

pub fn encode_photos(photos: &[String]) -> String {
    JsonValue::from(photos.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("user"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn admin_check_covers_both_admin_roles() {
        assert!(!Role::User.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
    }

    #[test]
    fn allows_only_forward_transitions() {
        use OrderStatus::*;
        let allowed = [
            (Pending, Paid),
            (Pending, Canceled),
            (Paid, Shipped),
            (Paid, Canceled),
            (Shipped, Completed),
        ];
        let all = [Pending, Paid, Shipped, Completed, Canceled];
        for from in all {
            for to in all {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{} -> {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        use OrderStatus::*;
        for to in [Pending, Paid, Shipped, Completed, Canceled] {
            assert!(!Completed.can_transition_to(to));
            assert!(!Canceled.can_transition_to(to));
        }
    }

    #[test]
    fn specs_round_trip() {
        let specs = serde_json::json!({"cpu": "M3", "ram": "16GB"});
        let encoded = encode_specs(&specs);
        assert_eq!(decode_specs(Some(&encoded)), Some(specs));
    }

    #[test]
    fn malformed_specs_decode_to_none() {
        assert_eq!(decode_specs(Some("{not json")), None);
        assert_eq!(decode_specs(Some("")), None);
        assert_eq!(decode_specs(None), None);
    }

    #[test]
    fn photos_round_trip_and_reject_non_arrays() {
        let photos = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let encoded = encode_photos(&photos);
        assert_eq!(decode_photos(Some(&encoded)), Some(photos));
        assert_eq!(decode_photos(Some("{\"not\": \"array\"}")), None);
        assert_eq!(decode_photos(Some("[1, 2]")), None);
        assert_eq!(decode_photos(None), None);
    }
}
