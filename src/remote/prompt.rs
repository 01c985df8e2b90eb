// 该文件是 Wanxiang （万象） 项目的一部分。
// src/remote/prompt.rs - 提示词构造
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

/// 构造目标检测提示词，插入用户指定的目标名称。
///
/// 提示词要求模型只返回固定模式的 JSON 数组，坐标落在归一化空间。
pub fn detection_prompt(object_name: &str) -> String {
  format!(
    r#"You are given an image. Identify all {object_name} in the image and provide their bounding boxes.
Return ONLY a valid JSON array in the exact format shown below. Do NOT include any additional text, explanations, comments, trailing commas, or markdown formatting such as code blocks.
Use this JSON schema:
[
{{
"name": "string",
"ymin": float,
"xmin": float,
"ymax": float,
"xmax": float
}}
]
"#
  )
}

/// 音频转写提示词
pub const TRANSCRIPTION_PROMPT: &str = r#"Please transcribe this interview in the following format:
[Speaker Name or Speaker A/B]: [Dialogue or caption].
If a speaker's name is mentioned or can be identified in the audio, map the actual names accordingly.
If no names are given, use Speaker A, Speaker B, etc.
Ensure the transcription captures all spoken words accurately, including filler words where appropriate.
"#;

/// 元数据生成提示词，字段结构由响应模式约束
pub const METADATA_PROMPT: &str = "Provide the details based on provided response schema";
