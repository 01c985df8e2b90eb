// 该文件是 Wanxiang （万象） 项目的一部分。
// src/parse.rs - 模型响应中边界框的解析与校验
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use serde_json::Value;
use thiserror::Error;

use crate::bbox::NormalizedBox;

/// 每个边界框对象必须且只能包含的字段
const REQUIRED_KEYS: [&str; 5] = ["name", "ymin", "xmin", "ymax", "xmax"];

#[derive(Error, Debug)]
pub enum ParseError {
  /// 文本不是语法合法的 JSON，内部错误带行列位置
  #[error("响应不是合法的 JSON: {0}")]
  InvalidJson(#[from] serde_json::Error),
  /// 顶层值不是数组
  #[error("响应 JSON 不是数组: 实际为 {actual}")]
  NotAnArray { actual: &'static str },
  /// 数组元素不是对象
  #[error("边界框条目不是对象: {element}")]
  NotAnObject { element: String },
  /// 元素缺少必需字段
  #[error("边界框缺少字段 {missing:?}: {element}")]
  MissingKeys {
    missing: Vec<&'static str>,
    element: String,
  },
  /// 字段存在但类型错误
  #[error("边界框字段 '{key}' 类型错误: 期望 {expected}, 实际 {actual}, 条目 {element}")]
  WrongType {
    key: &'static str,
    expected: &'static str,
    actual: &'static str,
    element: String,
  },
  /// 元素包含模式之外的字段
  #[error("边界框包含未知字段 '{key}': {element}")]
  UnknownKey { key: String, element: String },
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn coordinate(
  fields: &serde_json::Map<String, Value>,
  key: &'static str,
  element: &Value,
) -> Result<f64, ParseError> {
  match &fields[key] {
    Value::Number(number) if number.as_f64().is_some() => Ok(number.as_f64().unwrap_or_default()),
    other => Err(ParseError::WrongType {
      key,
      expected: "number",
      actual: value_kind(other),
      element: element.to_string(),
    }),
  }
}

/// 把清理后的模型响应解析为归一化边界框序列。
///
/// 仅做结构与类型校验，坐标的取值范围与顺序由坐标转换阶段负责。
/// 成功时按输入顺序返回完整的记录序列。
pub fn parse_bounding_boxes(text: &str) -> Result<Vec<NormalizedBox>, ParseError> {
  let value: Value = serde_json::from_str(text)?;

  let Value::Array(items) = value else {
    return Err(ParseError::NotAnArray {
      actual: value_kind(&value),
    });
  };

  let mut boxes = Vec::with_capacity(items.len());
  for item in &items {
    let Value::Object(fields) = item else {
      return Err(ParseError::NotAnObject {
        element: item.to_string(),
      });
    };

    let missing: Vec<&'static str> = REQUIRED_KEYS
      .iter()
      .copied()
      .filter(|key| !fields.contains_key(*key))
      .collect();
    if !missing.is_empty() {
      return Err(ParseError::MissingKeys {
        missing,
        element: item.to_string(),
      });
    }

    if let Some(key) = fields.keys().find(|key| !REQUIRED_KEYS.contains(&key.as_str())) {
      return Err(ParseError::UnknownKey {
        key: key.clone(),
        element: item.to_string(),
      });
    }

    let name = match &fields["name"] {
      Value::String(name) => name.clone(),
      other => {
        return Err(ParseError::WrongType {
          key: "name",
          expected: "string",
          actual: value_kind(other),
          element: item.to_string(),
        });
      }
    };

    boxes.push(NormalizedBox {
      name,
      ymin: coordinate(fields, "ymin", item)?,
      xmin: coordinate(fields, "xmin", item)?,
      ymax: coordinate(fields, "ymax", item)?,
      xmax: coordinate(fields, "xmax", item)?,
    });
  }

  Ok(boxes)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn parses_single_record() {
    let text = r#"[{"name":"cat","ymin":100,"xmin":200,"ymax":300,"xmax":400}]"#;
    let boxes = parse_bounding_boxes(text).unwrap();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].name, "cat");
    assert_eq!(boxes[0].ymin, 100.0);
    assert_eq!(boxes[0].xmin, 200.0);
    assert_eq!(boxes[0].ymax, 300.0);
    assert_eq!(boxes[0].xmax, 400.0);
  }

  #[test]
  fn accepts_float_coordinates_and_preserves_order() {
    let text = r#"[
      {"name":"a","ymin":10.5,"xmin":0,"ymax":20.25,"xmax":30},
      {"name":"b","ymin":1,"xmin":2,"ymax":3,"xmax":4}
    ]"#;
    let boxes = parse_bounding_boxes(text).unwrap();
    assert_eq!(boxes[0].ymin, 10.5);
    assert_eq!(boxes[0].name, "a");
    assert_eq!(boxes[1].name, "b");
  }

  #[test]
  fn empty_array_is_valid() {
    assert!(parse_bounding_boxes("[]").unwrap().is_empty());
  }

  #[test]
  fn round_trips_valid_records() {
    let records = json!([
      {"name":"cat","ymin":100,"xmin":200,"ymax":300,"xmax":400},
      {"name":"dog","ymin":0.5,"xmin":1.5,"ymax":2.5,"xmax":3.5}
    ]);
    let boxes = parse_bounding_boxes(&records.to_string()).unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[1].name, "dog");
    assert_eq!(boxes[1].xmax, 3.5);
  }

  #[test]
  fn rejects_invalid_json() {
    let err = parse_bounding_boxes("[{\"name\":").unwrap_err();
    assert!(matches!(err, ParseError::InvalidJson(_)));
  }

  #[test]
  fn rejects_non_array_root() {
    let err = parse_bounding_boxes(r#"{"name":"cat"}"#).unwrap_err();
    match err {
      ParseError::NotAnArray { actual } => assert_eq!(actual, "object"),
      other => panic!("意外的错误: {other:?}"),
    }
  }

  #[test]
  fn rejects_non_object_element() {
    let err = parse_bounding_boxes("[42]").unwrap_err();
    assert!(matches!(err, ParseError::NotAnObject { .. }));
  }

  #[test]
  fn missing_key_is_named() {
    let err = parse_bounding_boxes(r#"[{"name":"cat","ymin":100,"xmin":200,"ymax":300}]"#)
      .unwrap_err();
    match err {
      ParseError::MissingKeys { missing, .. } => assert_eq!(missing, vec!["xmax"]),
      other => panic!("意外的错误: {other:?}"),
    }
    let message = parse_bounding_boxes(r#"[{"name":"cat","ymin":100,"xmin":200,"ymax":300}]"#)
      .unwrap_err()
      .to_string();
    assert!(message.contains("xmax"));
  }

  #[test]
  fn wrong_type_names_key_and_types() {
    let err = parse_bounding_boxes(r#"[{"name":7,"ymin":100,"xmin":200,"ymax":300,"xmax":400}]"#)
      .unwrap_err();
    match err {
      ParseError::WrongType {
        key,
        expected,
        actual,
        ..
      } => {
        assert_eq!(key, "name");
        assert_eq!(expected, "string");
        assert_eq!(actual, "number");
      }
      other => panic!("意外的错误: {other:?}"),
    }

    let err =
      parse_bounding_boxes(r#"[{"name":"cat","ymin":"100","xmin":200,"ymax":300,"xmax":400}]"#)
        .unwrap_err();
    assert!(matches!(
      err,
      ParseError::WrongType {
        key: "ymin",
        expected: "number",
        ..
      }
    ));
  }

  #[test]
  fn unknown_key_is_rejected() {
    let err = parse_bounding_boxes(
      r#"[{"name":"cat","ymin":100,"xmin":200,"ymax":300,"xmax":400,"score":0.9}]"#,
    )
    .unwrap_err();
    match err {
      ParseError::UnknownKey { key, .. } => assert_eq!(key, "score"),
      other => panic!("意外的错误: {other:?}"),
    }
  }
}
