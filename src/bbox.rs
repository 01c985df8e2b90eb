// 该文件是 Wanxiang （万象） 项目的一部分。
// src/bbox.rs - 边界框数据模型与坐标转换
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

use tracing::warn;

/// 归一化坐标空间的边长，模型输出的坐标落在 [0, 1000] 内
pub const NORMALIZED_RANGE: f64 = 1000.0;

/// 归一化坐标下的边界框，字段顺序与模型输出一致
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBox {
  pub name: String,
  pub ymin: f64,
  pub xmin: f64,
  pub ymax: f64,
  pub xmax: f64,
}

/// 像素坐标下的边界框
///
/// 不变量: `0 <= xmin < xmax <= 图像宽度` 且 `0 <= ymin < ymax <= 图像高度`，
/// 由 [`to_pixel_boxes`] 在转换时保证。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBox {
  pub name: String,
  pub xmin: u32,
  pub ymin: u32,
  pub xmax: u32,
  pub ymax: u32,
}

/// 把归一化坐标批量转换为像素坐标。
///
/// 转换公式为 `trunc(坐标 / 1000 * 图像边长)`，向零截断而非四舍五入。
/// 转换后违反不变量的边界框被直接丢弃（仅记录诊断日志），
/// 单个坏框不会中断整批响应。输出顺序与输入一致，仅缺少被丢弃的条目。
pub fn to_pixel_boxes(boxes: &[NormalizedBox], width: u32, height: u32) -> Vec<PixelBox> {
  let mut converted = Vec::with_capacity(boxes.len());

  for bbox in boxes {
    let xmin = (bbox.xmin / NORMALIZED_RANGE * width as f64).trunc() as i64;
    let ymin = (bbox.ymin / NORMALIZED_RANGE * height as f64).trunc() as i64;
    let xmax = (bbox.xmax / NORMALIZED_RANGE * width as f64).trunc() as i64;
    let ymax = (bbox.ymax / NORMALIZED_RANGE * height as f64).trunc() as i64;

    let x_valid = 0 <= xmin && xmin < xmax && xmax <= width as i64;
    let y_valid = 0 <= ymin && ymin < ymax && ymax <= height as i64;
    if !x_valid || !y_valid {
      warn!("转换后的边界框坐标无效, 丢弃: {:?}", bbox);
      continue;
    }

    converted.push(PixelBox {
      name: bbox.name.clone(),
      xmin: xmin as u32,
      ymin: ymin as u32,
      xmax: xmax as u32,
      ymax: ymax as u32,
    });
  }

  converted
}
