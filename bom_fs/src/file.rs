//! Random-access file with little-endian scalar IO
//! 随机访问文件，标量按小端读写
//!
//! The catalog stores mutate records in place and append at the tail,
//! so every handle is opened for both read and write.
//! 目录存储会原地修改记录并在尾部追加，因此句柄均以读写方式打开。

use std::{
  fs::{File, OpenOptions},
  io::{Read, Seek, SeekFrom, Write},
  path::Path,
};

use bom_base::Result;

/// Random-access binary file, all scalars little-endian
/// 随机访问二进制文件，所有标量为小端
pub struct BinFile {
  file: File,
}

impl BinFile {
  /// Open existing file for read and write
  /// 打开已有文件用于读写
  pub fn open_rw(path: impl AsRef<Path>) -> Result<Self> {
    let file = OpenOptions::new().read(true).write(true).open(path)?;
    Ok(Self { file })
  }

  /// Create (truncating any existing file) and open for read and write.
  /// Falls back to create-then-reopen when the platform cannot do both
  /// in one step.
  /// 创建（截断已有文件）并以读写方式打开。
  /// 若平台无法一步完成，则回退为先创建再重新打开。
  pub fn create_rw(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    match OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(true)
      .open(path)
    {
      Ok(file) => Ok(Self { file }),
      Err(e) => {
        log::debug!("create_rw fallback for {}: {e}", path.display());
        File::create(path)?;
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
      }
    }
  }

  /// Current byte length / 当前字节长度
  #[inline]
  pub fn size(&self) -> Result<u64> {
    Ok(self.file.metadata()?.len())
  }

  /// Position for the next read or write / 定位下一次读写
  #[inline]
  pub fn seek(&mut self, pos: u64) -> Result<()> {
    self.file.seek(SeekFrom::Start(pos))?;
    Ok(())
  }

  /// Current position / 当前位置
  #[inline]
  pub fn tell(&mut self) -> Result<u64> {
    Ok(self.file.stream_position()?)
  }

  /// Hand buffered writes to the operating system
  /// 将缓冲写入移交操作系统
  #[inline]
  pub fn flush(&mut self) -> Result<()> {
    self.file.flush()?;
    Ok(())
  }

  /// Write exactly `data.len()` bytes; writing past EOF grows the file
  /// 精确写入 `data.len()` 字节；越过文件尾写入会增长文件
  #[inline]
  pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
    self.file.write_all(data)?;
    Ok(())
  }

  /// Read exactly `buf.len()` bytes / 精确读取 `buf.len()` 字节
  #[inline]
  pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
    self.file.read_exact(buf)?;
    Ok(())
  }

  #[inline]
  pub fn write_u8(&mut self, v: u8) -> Result<()> {
    self.write_bytes(&[v])
  }

  #[inline]
  pub fn write_u16(&mut self, v: u16) -> Result<()> {
    self.write_bytes(&v.to_le_bytes())
  }

  #[inline]
  pub fn write_u32(&mut self, v: u32) -> Result<()> {
    self.write_bytes(&v.to_le_bytes())
  }

  #[inline]
  pub fn read_u8(&mut self) -> Result<u8> {
    let mut b = [0u8; 1];
    self.read_bytes(&mut b)?;
    Ok(b[0])
  }

  #[inline]
  pub fn read_u16(&mut self) -> Result<u16> {
    let mut b = [0u8; 2];
    self.read_bytes(&mut b)?;
    Ok(u16::from_le_bytes(b))
  }

  #[inline]
  pub fn read_u32(&mut self) -> Result<u32> {
    let mut b = [0u8; 4];
    self.read_bytes(&mut b)?;
    Ok(u32::from_le_bytes(b))
  }

  /// Write a fixed-width field: overlong input is cut at `len` bytes,
  /// short input is right-padded with `pad`.
  /// 写定宽字段：超长输入截断到 `len` 字节，不足则在右侧以 `pad` 填充。
  pub fn write_fixed_str(&mut self, s: &str, len: usize, pad: u8) -> Result<()> {
    let bytes = s.as_bytes();
    let mut buf = vec![pad; len];
    let n = bytes.len().min(len);
    buf[..n].copy_from_slice(&bytes[..n]);
    self.write_bytes(&buf)
  }

  /// Read a fixed-width field, padding included
  /// 读定宽字段，包含填充
  pub fn read_fixed_str(&mut self, len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    self.read_bytes(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
  }
}
