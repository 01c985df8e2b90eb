// 该文件是 Wanxiang （万象） 项目的一部分。
// src/task.rs - 标注流水线
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

use image::RgbImage;
use tracing::{info, warn};

use crate::bbox::{PixelBox, to_pixel_boxes};
use crate::markdown::strip_markdown;
use crate::output::Draw;
use crate::parse::{ParseError, parse_bounding_boxes};

/// 一次标注的结果：画好的图像与存活下来的像素坐标框
#[derive(Debug)]
pub struct Annotation {
  pub image: RgbImage,
  pub boxes: Vec<PixelBox>,
}

/// 把一次模型响应变成标注结果。
///
/// 流水线为 清理 Markdown -> 解析 -> 坐标转换 -> 绘制，
/// 解析失败立即中止且不产生部分结果。在输入图像的副本上绘制，
/// 原图保持不变。空的边界框列表是合法结果，与解析失败语义不同。
pub fn annotate_response(
  raw_text: &str,
  image: &RgbImage,
  draw: &Draw,
  with_labels: bool,
) -> Result<Annotation, ParseError> {
  let clean = strip_markdown(raw_text);
  let records = parse_bounding_boxes(&clean)?;
  info!("解析到 {} 个边界框", records.len());

  let boxes = to_pixel_boxes(&records, image.width(), image.height());
  if boxes.len() < records.len() {
    warn!("丢弃 {} 个坐标无效的边界框", records.len() - boxes.len());
  }

  let mut annotated = image.clone();
  draw.draw_boxes(&mut annotated, &boxes, with_labels);
  info!("绘制完成, 共 {} 个边界框", boxes.len());

  Ok(Annotation {
    image: annotated,
    boxes,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::Rgb;

  fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
  }

  #[test]
  fn markdown_wrapped_response_produces_one_box() {
    let raw = "```json\n[{\"name\":\"cat\",\"ymin\":100,\"xmin\":200,\"ymax\":300,\"xmax\":400}]\n```";
    let image = blank(640, 480);
    let annotation = annotate_response(raw, &image, &Draw::default(), true).unwrap();

    assert_eq!(annotation.boxes.len(), 1);
    let bbox = &annotation.boxes[0];
    assert_eq!(bbox.name, "cat");
    // 100/1000*480=48, 200/1000*640=128, 300/1000*480=144, 400/1000*640=256
    assert_eq!(bbox.ymin, 48);
    assert_eq!(bbox.xmin, 128);
    assert_eq!(bbox.ymax, 144);
    assert_eq!(bbox.xmax, 256);
  }

  #[test]
  fn input_image_is_left_untouched() {
    let raw = "[{\"name\":\"cat\",\"ymin\":100,\"xmin\":200,\"ymax\":300,\"xmax\":400}]";
    let image = blank(640, 480);
    let annotation = annotate_response(raw, &image, &Draw::default(), true).unwrap();

    assert_eq!(*image.get_pixel(128, 48), Rgb([10, 20, 30]));
    assert_ne!(*annotation.image.get_pixel(128, 48), Rgb([10, 20, 30]));
  }

  #[test]
  fn empty_detection_is_success_not_error() {
    let image = blank(64, 64);
    let annotation = annotate_response("[]", &image, &Draw::default(), true).unwrap();
    assert!(annotation.boxes.is_empty());
    assert_eq!(annotation.image.as_raw(), image.as_raw());
  }

  #[test]
  fn parse_failure_aborts_without_partial_result() {
    let image = blank(64, 64);
    let err = annotate_response("{\"name\":\"cat\"}", &image, &Draw::default(), true).unwrap_err();
    assert!(matches!(err, ParseError::NotAnArray { .. }));
  }

  #[test]
  fn degenerate_boxes_are_filtered_not_fatal() {
    let raw = r#"[
      {"name":"cat","ymin":100,"xmin":200,"ymax":300,"xmax":400},
      {"name":"ghost","ymin":0,"xmin":500,"ymax":100,"xmax":500}
    ]"#;
    let image = blank(640, 480);
    let annotation = annotate_response(raw, &image, &Draw::default(), false).unwrap();
    assert_eq!(annotation.boxes.len(), 1);
    assert_eq!(annotation.boxes[0].name, "cat");
  }
}
