// 该文件是 Wanxiang （万象） 项目的一部分。
// src/output/draw.rs - 边界框与标签的可视化
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

use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use anyhow::Result;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::warn;

use crate::bbox::PixelBox;

// 文本渲染常量
const LABEL_FONT_SIZE: f32 = 20.0;
const LABEL_PADDING: i32 = 2;
const BITMAP_GLYPH_SIZE: i32 = 8;
const BOX_COLOR: [u8; 3] = [255, 0, 0]; // 红色边框
const LABEL_BG_COLOR: [u8; 3] = [255, 255, 0]; // 黄色底板
const LABEL_TEXT_COLOR: [u8; 3] = [0, 0, 0]; // 黑色文本

/// 标签字体来源，在构造 [`Draw`] 时解析一次。
///
/// 给定路径加载失败不会报错，而是回退到内置点阵字体。
#[derive(Debug, Clone, Default)]
pub struct FontSource {
  pub path: Option<PathBuf>,
}

enum LabelFont {
  Ttf(FontArc),
  Bitmap { scale: i32 },
}

impl LabelFont {
  fn bitmap() -> Self {
    let scale = ((LABEL_FONT_SIZE / BITMAP_GLYPH_SIZE as f32).round() as i32).max(1);
    LabelFont::Bitmap { scale }
  }
}

/// 可视化工具，把像素坐标的边界框与名称标签画到图像上
pub struct Draw {
  font: LabelFont,
  font_size: f32,
  box_color: Rgb<u8>,
  label_bg_color: Rgb<u8>,
  label_text_color: Rgb<u8>,
}

impl Default for Draw {
  fn default() -> Self {
    Self::new(&FontSource::default())
  }
}

impl Draw {
  /// 创建一个新的可视化工具，字体在此处一次性解析
  pub fn new(source: &FontSource) -> Self {
    let font = match &source.path {
      Some(path) => match Self::load_ttf(path) {
        Ok(font) => LabelFont::Ttf(font),
        Err(err) => {
          warn!("无法加载字体 {}: {}, 回退到内置点阵字体", path.display(), err);
          LabelFont::bitmap()
        }
      },
      None => LabelFont::bitmap(),
    };

    Self {
      font,
      font_size: LABEL_FONT_SIZE,
      box_color: Rgb(BOX_COLOR),
      label_bg_color: Rgb(LABEL_BG_COLOR),
      label_text_color: Rgb(LABEL_TEXT_COLOR),
    }
  }

  fn load_ttf(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path)?;
    Ok(FontArc::try_from_vec(data)?)
  }

  /// 在图像上绘制边界框，可选地带名称标签。
  ///
  /// 按序列顺序绘制，后画的框覆盖先画的框。直接修改传入的图像，
  /// 是否先做防御性拷贝由调用方决定。空序列不触碰图像。
  pub fn draw_boxes(&self, image: &mut RgbImage, boxes: &[PixelBox], with_labels: bool) {
    for bbox in boxes {
      self.draw_outline(image, bbox);
      if with_labels {
        self.draw_label(image, bbox);
      }
    }
  }

  // 绘制空心矩形边框，加粗为 2 像素
  fn draw_outline(&self, image: &mut RgbImage, bbox: &PixelBox) {
    let width = bbox.xmax - bbox.xmin;
    let height = bbox.ymax - bbox.ymin;

    let rect = Rect::at(bbox.xmin as i32, bbox.ymin as i32).of_size(width, height);
    draw_hollow_rect_mut(image, rect, self.box_color);

    if width > 2 && height > 2 {
      let inner =
        Rect::at(bbox.xmin as i32 + 1, bbox.ymin as i32 + 1).of_size(width - 2, height - 2);
      draw_hollow_rect_mut(image, inner, self.box_color);
    }
  }

  // 在边框左上角上方绘制标签：不透明底板加名称文本，底板夹紧到图像上边缘
  fn draw_label(&self, image: &mut RgbImage, bbox: &PixelBox) {
    let (text_width, text_height) = self.measure(&bbox.name);

    let text_x = bbox.xmin as i32;
    let text_y = (bbox.ymin as i32 - text_height - LABEL_PADDING).max(0);

    let plate = Rect::at(text_x - LABEL_PADDING, text_y - LABEL_PADDING).of_size(
      (text_width + 2 * LABEL_PADDING) as u32,
      (text_height + 2 * LABEL_PADDING) as u32,
    );
    draw_filled_rect_mut(image, plate, self.label_bg_color);

    match &self.font {
      LabelFont::Ttf(font) => {
        let scale = PxScale::from(self.font_size);
        draw_text_mut(
          image,
          self.label_text_color,
          text_x,
          text_y,
          scale,
          font,
          &bbox.name,
        );
      }
      LabelFont::Bitmap { scale } => {
        self.draw_bitmap_text(image, text_x, text_y, &bbox.name, *scale);
      }
    }
  }

  // 文本尺寸，TTF 走 imageproc 的度量，点阵字体按字符格计算
  fn measure(&self, text: &str) -> (i32, i32) {
    match &self.font {
      LabelFont::Ttf(font) => {
        let (width, height) = text_size(PxScale::from(self.font_size), font, text);
        (width as i32, height as i32)
      }
      LabelFont::Bitmap { scale } => {
        let chars = text.chars().count() as i32;
        (chars * BITMAP_GLYPH_SIZE * scale, BITMAP_GLYPH_SIZE * scale)
      }
    }
  }

  fn draw_bitmap_text(&self, image: &mut RgbImage, x: i32, y: i32, text: &str, scale: i32) {
    let mut cursor_x = x;
    for ch in text.chars() {
      let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
        cursor_x += BITMAP_GLYPH_SIZE * scale;
        continue;
      };
      for (row_index, row) in glyph.iter().enumerate() {
        for col_index in 0..BITMAP_GLYPH_SIZE {
          if (*row >> col_index) & 1 == 0 {
            continue;
          }
          let pixel_x = cursor_x + col_index * scale;
          let pixel_y = y + row_index as i32 * scale;
          for dy in 0..scale {
            for dx in 0..scale {
              let target_x = pixel_x + dx;
              let target_y = pixel_y + dy;
              if target_x >= 0
                && target_y >= 0
                && (target_x as u32) < image.width()
                && (target_y as u32) < image.height()
              {
                image.put_pixel(target_x as u32, target_y as u32, self.label_text_color);
              }
            }
          }
        }
      }
      cursor_x += BITMAP_GLYPH_SIZE * scale;
    }
  }
}
