use heck::ToPascalCase;

/// Derive a camelCase operation name from HTTP method + path, for endpoints
/// the analyzer reported without an operationId.
///
/// Examples:
/// - `GET /users` → `listUsers`
/// - `POST /users` → `createUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `PUT /users/{userId}` → `updateUser`
/// - `DELETE /users/{userId}` → `deleteUser`
/// - `GET /users/{userId}/messages/{messageId}` → `getUsersMessage`
pub fn route_to_name(method: &str, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if is_path_param(seg) {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let prefix = match method.to_ascii_uppercase().as_str() {
        "GET" if ends_with_param => "get",
        "GET" => "list",
        "POST" => "create",
        "PUT" => "update",
        "DELETE" => "delete",
        "PATCH" => "patch",
        "OPTIONS" => "options",
        "HEAD" => "head",
        "TRACE" => "trace",
        _ => "call",
    };

    let mut pascal_parts = String::new();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        pascal_parts.push_str(&word.to_pascal_case());
    }

    format!("{prefix}{pascal_parts}")
}

/// Whether a path segment is a `{param}` placeholder.
pub fn is_path_param(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// Naive singularization: `ies` becomes `y`, `ses`/`xes`/`zes` drop the
/// `es`, and any other trailing `s` (but not `ss`) is stripped.
fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_to_name_list() {
        assert_eq!(route_to_name("GET", "/users"), "listUsers");
    }

    #[test]
    fn test_route_to_name_create() {
        assert_eq!(route_to_name("POST", "/users"), "createUsers");
    }

    #[test]
    fn test_route_to_name_single() {
        assert_eq!(route_to_name("GET", "/users/{userId}"), "getUser");
        assert_eq!(route_to_name("delete", "/categories/{id}"), "deleteCategory");
        assert_eq!(route_to_name("PUT", "/boxes/{id}"), "updateBox");
    }

    #[test]
    fn test_route_to_name_nested() {
        assert_eq!(
            route_to_name("GET", "/users/{userId}/messages/{messageId}"),
            "getUsersMessage"
        );
        assert_eq!(route_to_name("POST", "/auth/login"), "createAuthLogin");
    }

    #[test]
    fn test_singularize_rules() {
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("access"), "access");
        assert_eq!(singularize("ies"), "ie");
    }

    #[test]
    fn test_route_to_name_root() {
        assert_eq!(route_to_name("GET", "/"), "list");
    }

    #[test]
    fn test_is_path_param() {
        assert!(is_path_param("{id}"));
        assert!(!is_path_param("users"));
        assert!(!is_path_param("{id}.json"));
    }
}
