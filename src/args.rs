// 该文件是 Wanxiang （万象） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;

/// Wanxiang 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入图像文件路径
  /// 支持格式: *.jpg, *.jpeg, *.png
  #[arg(long, value_name = "FILE")]
  pub image: String,

  /// 模型响应文本文件路径（检测调用返回的原始文本）
  #[arg(long, value_name = "FILE")]
  pub response: String,

  /// 输出文件路径（缺省时使用带时间戳的文件名）
  #[arg(long, value_name = "OUTPUT")]
  pub output: Option<String>,

  /// 标签字体文件路径（缺省时使用内置点阵字体）
  #[arg(long, value_name = "FONT")]
  pub font: Option<PathBuf>,

  /// 不在边界框上方绘制名称标签
  #[arg(long)]
  pub no_labels: bool,

  /// 打印针对该目标名称的检测提示词后再处理
  #[arg(long, value_name = "OBJECT")]
  pub object: Option<String>,
}
