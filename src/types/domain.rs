use serde_json::Value;

pub type UserId = i32;
pub type ItemId = i32;
pub type OutfitId = i32;
pub type WeatherId = i32;
pub type TrendId = i32;
pub type ProductId = i32;

/// 把 `"street, casual,,y2k "` 解析为去空白、去空项的分类列表
#[must_use]
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 分类列表写回逗号分隔的列值；空列表写 `None`
#[must_use]
pub fn join_categories(categories: &[String]) -> Option<String> {
    let cleaned: Vec<&str> = categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    (!cleaned.is_empty()).then(|| cleaned.join(","))
}

/// 标签列表转为 JSON 数组列值
#[must_use]
pub fn tags_to_json(tags: &[String]) -> Option<Value> {
    if tags.is_empty() {
        None
    } else {
        Some(Value::Array(
            tags.iter().map(|t| Value::String(t.clone())).collect(),
        ))
    }
}

/// 从 JSON 列值读取标签，忽略非字符串元素
#[must_use]
pub fn tags_from_json(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("street,casual", vec!["street", "casual"])]
    #[case(" street , casual ,, y2k ", vec!["street", "casual", "y2k"])]
    #[case("", vec![])]
    #[case(",,", vec![])]
    fn test_parse_categories(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_categories(raw), expected);
    }

    #[test]
    fn test_join_categories() {
        let cats = vec!["street".to_string(), " ".to_string(), "y2k".to_string()];
        assert_eq!(join_categories(&cats).as_deref(), Some("street,y2k"));
        assert_eq!(join_categories(&[]), None);
    }

    #[test]
    fn test_tags_json() {
        let tags = vec!["wool".to_string(), "winter".to_string()];
        let json = tags_to_json(&tags);
        assert_eq!(tags_from_json(json.as_ref()), tags);
        assert_eq!(tags_to_json(&[]), None);
        assert!(tags_from_json(Some(&serde_json::json!({"a": 1}))).is_empty());
        assert_eq!(
            tags_from_json(Some(&serde_json::json!(["a", 1, "b"]))),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
