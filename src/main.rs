// 该文件是 Wanxiang （万象） 项目的一部分。
// src/main.rs - 项目主程序
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

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;

use wanxiang::args::Args;
use wanxiang::output::{Draw, FontSource, default_output_path, save_image_file};
use wanxiang::remote::prompt::detection_prompt;
use wanxiang::task::annotate_response;

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  println!("Wanxiang 多模态标注演示");
  println!("======================");
  println!("输入图像: {}", args.image);
  println!("模型响应: {}", args.response);
  println!();

  if let Some(object) = &args.object {
    println!("检测提示词 (目标: {object}):");
    println!("{}", detection_prompt(object));
  }

  // 读取输入
  let image = ImageReader::open(&args.image)
    .with_context(|| format!("无法打开图像: {}", args.image))?
    .decode()
    .with_context(|| format!("无法解码图像: {}", args.image))?
    .into_rgb8();
  println!("图像已载入: {}x{}", image.width(), image.height());

  let raw_text = std::fs::read_to_string(&args.response)
    .with_context(|| format!("无法读取模型响应: {}", args.response))?;

  // 运行标注流水线
  let draw = Draw::new(&FontSource {
    path: args.font.clone(),
  });
  let annotation = annotate_response(&raw_text, &image, &draw, !args.no_labels)
    .context("模型响应解析失败, 未生成标注")?;

  // 空检测结果与解析失败语义不同，单独提示
  if annotation.boxes.is_empty() {
    println!("未在图像中找到目标对象");
  } else {
    println!("检测到 {} 个对象:", annotation.boxes.len());
    for (index, bbox) in annotation.boxes.iter().enumerate() {
      println!(
        "  {}. {}: xmin={} ymin={} xmax={} ymax={}",
        index + 1,
        bbox.name,
        bbox.xmin,
        bbox.ymin,
        bbox.xmax,
        bbox.ymax
      );
    }
  }

  // 保存标注图像
  let output = args.output.map(PathBuf::from).unwrap_or_else(default_output_path);
  save_image_file(&annotation.image, &output)?;
  println!();
  println!("标注图像已保存: {}", output.display());

  Ok(())
}
