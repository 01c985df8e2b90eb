// 该文件是 Wanxiang （万象） 项目的一部分。
// src/markdown.rs - 去除模型响应中的 Markdown 语法
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

use std::sync::LazyLock;

use regex::{Captures, Regex};

// 各遍清理的顺序是有意义的：后面的遍处理前面的遍留下的文本，
// 且部分模式相互重叠（例如代码围栏与行内代码）。
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(^|\s)#+\s+").unwrap());
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
  // regex 不支持反向引用，这里把五种成对分隔符逐一展开
  Regex::new(r"\*\*(.*?)\*\*|\*(.*?)\*|__(.*?)__|_(.*?)_|~~(.*?)~~").unwrap()
});
static CODE_FENCE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"```[a-zA-Z]*\n([\s\S]*?)\n```").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`{1,3}([^`]*)`{1,3}").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]+\)").unwrap());
static BLOCKQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^>\s+").unwrap());
static HORIZONTAL_RULE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(^|\n)(-{3,}|_{3,}|\*{3,})(\n|$)").unwrap());
static LIST_MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(^|\n)(\s*[-+*]|\d+\.)\s+").unwrap());
static LEFTOVER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_~`]").unwrap());

/// 去除文本中的 Markdown 修饰。
///
/// 纯函数，永不失败：畸形的 Markdown 只会被原样保留而不会报错。
/// 用于在 JSON 解析之前清理模型输出中的格式化痕迹。
pub fn strip_markdown(text: &str) -> String {
  // 标题标记（#、##、### ...）
  let text = HEADER_RE.replace_all(text, "");

  // 加粗、斜体、删除线：去掉分隔符保留内部文本
  let text = EMPHASIS_RE.replace_all(&text, |caps: &Captures| {
    for index in 1..=5 {
      if let Some(inner) = caps.get(index) {
        return inner.as_str().to_string();
      }
    }
    String::new()
  });

  // 带语言标记的代码围栏，内部内容原样保留
  let text = CODE_FENCE_RE.replace_all(&text, "$1");

  // 行内代码
  let text = INLINE_CODE_RE.replace_all(&text, "$1");

  // 链接 [text](url) 与图片 ![alt](url)
  let text = LINK_RE.replace_all(&text, "$1");
  let text = IMAGE_RE.replace_all(&text, "$1");

  // 引用块标记
  let text = BLOCKQUOTE_RE.replace_all(&text, "");

  // 水平分割线
  let text = HORIZONTAL_RULE_RE.replace_all(&text, "$1");

  // 列表标记（无序与有序）
  let text = LIST_MARKER_RE.replace_all(&text, "$1");

  // 残留的 Markdown 特殊字符
  let text = LEFTOVER_RE.replace_all(&text, "");

  text.trim().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_code_fence_with_language_tag() {
    let input = "```json\n[{\"name\":\"cat\",\"ymin\":100,\"xmin\":200,\"ymax\":300,\"xmax\":400}]\n```";
    let expected = "[{\"name\":\"cat\",\"ymin\":100,\"xmin\":200,\"ymax\":300,\"xmax\":400}]";
    assert_eq!(strip_markdown(input), expected);
  }

  #[test]
  fn strips_headers() {
    assert_eq!(strip_markdown("# Title"), "Title");
    assert_eq!(strip_markdown("intro\n### Section\nbody"), "introSection\nbody");
  }

  #[test]
  fn strips_emphasis_pairs() {
    assert_eq!(strip_markdown("**bold** and *italic*"), "bold and italic");
    assert_eq!(strip_markdown("__strong__ and _em_"), "strong and em");
    assert_eq!(strip_markdown("~~gone~~"), "gone");
  }

  #[test]
  fn strips_inline_code() {
    assert_eq!(strip_markdown("use `foo()` here"), "use foo() here");
  }

  #[test]
  fn replaces_links_and_images_with_text() {
    assert_eq!(strip_markdown("see [docs](https://example.com)"), "see docs");
    // 链接遍先于图片遍命中 [alt](url) 部分，感叹号保留
    assert_eq!(strip_markdown("![alt](https://example.com/a.png)"), "!alt");
  }

  #[test]
  fn strips_blockquotes_and_rules() {
    assert_eq!(strip_markdown("> quoted text"), "quoted text");
    assert_eq!(strip_markdown("above\n---\nbelow"), "above\nbelow");
  }

  #[test]
  fn strips_list_markers() {
    assert_eq!(strip_markdown("- one\n- two"), "one\ntwo");
    assert_eq!(strip_markdown("1. first\n2. second"), "first\nsecond");
  }

  #[test]
  fn strips_stray_delimiters() {
    assert_eq!(strip_markdown("a*b_c~d`e"), "abcde");
  }

  #[test]
  fn trims_surrounding_whitespace() {
    assert_eq!(strip_markdown("  plain text \n"), "plain text");
  }

  #[test]
  fn idempotent_on_clean_text() {
    let clean = "[{\"name\":\"cat\",\"ymin\":100,\"xmin\":200,\"ymax\":300,\"xmax\":400}]";
    let once = strip_markdown(clean);
    assert_eq!(strip_markdown(&once), once);
  }
}
