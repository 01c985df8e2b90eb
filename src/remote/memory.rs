// 该文件是 Wanxiang （万象） 项目的一部分。
// src/remote/memory.rs - 内存实现的远端文件存储
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

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use thiserror::Error;

use crate::remote::{FileStore, RemoteFile, RemoteFileState};

#[derive(Error, Debug)]
pub enum MemoryStoreError {
  #[error("远端文件不存在: {0}")]
  NotFound(String),
}

struct StoredEntry {
  display_name: String,
  remaining_polls: u32,
  failed: bool,
}

impl StoredEntry {
  fn state(&self) -> RemoteFileState {
    if self.failed {
      RemoteFileState::Failed
    } else if self.remaining_polls > 0 {
      RemoteFileState::Processing
    } else {
      RemoteFileState::Active
    }
  }

  fn file(&self, name: &str) -> RemoteFile {
    RemoteFile {
      name: name.to_string(),
      display_name: self.display_name.clone(),
      state: self.state(),
    }
  }
}

/// 内存中的远端文件存储。
///
/// 演示与测试用的替身：上传的文件先处于处理中状态，
/// 被查询 `activation_polls` 次后变为就绪。
pub struct MemoryFileStore {
  entries: RefCell<BTreeMap<String, StoredEntry>>,
  next_id: Cell<u64>,
  activation_polls: u32,
}

impl MemoryFileStore {
  pub fn new(activation_polls: u32) -> Self {
    Self {
      entries: RefCell::new(BTreeMap::new()),
      next_id: Cell::new(1),
      activation_polls,
    }
  }

  /// 把一个文件标记为处理失败
  pub fn mark_failed(&self, name: &str) {
    if let Some(entry) = self.entries.borrow_mut().get_mut(name) {
      entry.failed = true;
    }
  }
}

impl FileStore for MemoryFileStore {
  type Error = MemoryStoreError;

  fn upload(&mut self, _data: &[u8], display_name: &str) -> Result<RemoteFile, Self::Error> {
    let id = self.next_id.get();
    self.next_id.set(id + 1);

    let name = format!("files/{id:06}");
    let entry = StoredEntry {
      display_name: display_name.to_string(),
      remaining_polls: self.activation_polls,
      failed: false,
    };
    let file = entry.file(&name);
    self.entries.borrow_mut().insert(name, entry);

    Ok(file)
  }

  fn get(&self, name: &str) -> Result<RemoteFile, Self::Error> {
    let mut entries = self.entries.borrow_mut();
    let entry = entries
      .get_mut(name)
      .ok_or_else(|| MemoryStoreError::NotFound(name.to_string()))?;

    if entry.remaining_polls > 0 {
      entry.remaining_polls -= 1;
    }

    Ok(entry.file(name))
  }

  fn list(&self) -> Result<Vec<RemoteFile>, Self::Error> {
    let entries = self.entries.borrow();
    Ok(entries.iter().map(|(name, entry)| entry.file(name)).collect())
  }

  fn delete(&mut self, name: &str) -> Result<(), Self::Error> {
    self
      .entries
      .borrow_mut()
      .remove(name)
      .map(|_| ())
      .ok_or_else(|| MemoryStoreError::NotFound(name.to_string()))
  }
}
