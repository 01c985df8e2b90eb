// 该文件是 Wanxiang （万象） 项目的一部分。
// src/metadata.rs - 媒体元数据模型
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

use serde::{Deserialize, Serialize};

/// 模型按响应模式生成的媒体元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
  pub name: String,
  pub title: String,
  /// 时长（秒）
  pub total_duration: f64,
  pub summary: String,
  pub small_summary: String,
  #[serde(default)]
  pub tags: Option<Vec<String>>,
}

/// 把模型响应解析为媒体元数据。
///
/// 元数据走结构化输出通道（response_mime_type 为 JSON），
/// 不经过 Markdown 清理，解码失败直接上报给调用方。
pub fn parse_metadata(text: &str) -> Result<MediaMetadata, serde_json::Error> {
  serde_json::from_str(text)
}
