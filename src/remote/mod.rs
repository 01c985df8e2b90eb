// 该文件是 Wanxiang （万象） 项目的一部分。
// src/remote/mod.rs - 远端文件与内容生成的接口定义
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

mod memory;
pub mod prompt;

pub use memory::{MemoryFileStore, MemoryStoreError};

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

/// 远端文件的处理状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFileState {
  Processing,
  Active,
  Failed,
  Other(String),
}

/// 远端服务返回的不透明文件句柄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
  pub name: String,
  pub display_name: String,
  pub state: RemoteFileState,
}

/// 远端文件存储接口，由外部服务的适配层实现
pub trait FileStore {
  type Error: std::error::Error;

  /// 上传一段完整缓冲的文件内容，返回远端句柄
  fn upload(&mut self, data: &[u8], display_name: &str) -> Result<RemoteFile, Self::Error>;

  /// 按远端名称重新查询文件
  fn get(&self, name: &str) -> Result<RemoteFile, Self::Error>;

  /// 列出已上传的文件
  fn list(&self) -> Result<Vec<RemoteFile>, Self::Error>;

  /// 删除一个远端文件
  fn delete(&mut self, name: &str) -> Result<(), Self::Error>;
}

/// 内容生成接口：给定就绪的文件与提示词，返回模型原始文本
pub trait GenerateText {
  type Error: std::error::Error;

  fn generate(&self, file: &RemoteFile, prompt: &str) -> Result<String, Self::Error>;
}

#[derive(Error, Debug)]
pub enum PollError<E: std::error::Error> {
  #[error("远端文件处理失败: {name}")]
  ProcessingFailed { name: String },
  #[error("远端文件状态异常 '{state}': {name}")]
  UnexpectedState { name: String, state: String },
  #[error("远端存储错误: {0}")]
  Store(#[source] E),
}

/// 轮询远端文件直到处理结束。
///
/// 处理中的文件按 `interval` 间隔重新查询；`Active` 返回就绪句柄，
/// `Failed` 与其余状态分别映射为错误。
pub fn poll_until_ready<S: FileStore>(
  store: &S,
  mut file: RemoteFile,
  interval: Duration,
) -> Result<RemoteFile, PollError<S::Error>> {
  loop {
    match &file.state {
      RemoteFileState::Processing => {
        info!("远端文件 {} 处理中, {:?} 后重新查询", file.name, interval);
        thread::sleep(interval);
        file = store.get(&file.name).map_err(PollError::Store)?;
      }
      RemoteFileState::Active => {
        info!("远端文件 {} 处理完成", file.name);
        return Ok(file);
      }
      RemoteFileState::Failed => {
        return Err(PollError::ProcessingFailed {
          name: file.name.clone(),
        });
      }
      RemoteFileState::Other(state) => {
        return Err(PollError::UnexpectedState {
          name: file.name.clone(),
          state: state.clone(),
        });
      }
    }
  }
}
