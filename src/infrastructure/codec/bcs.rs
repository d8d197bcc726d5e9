//! BCS (Binary Canonical Serialization) 编码，只实现交易构造需要的写方向。
//!
//! - 整数：定长小端
//! - 序列/字节串长度、枚举变体下标：ULEB128
//! - 结构体：字段按声明顺序直接拼接

/// 可以写成 BCS 字节的类型
pub trait ToBcs {
    fn write_bcs(&self, writer: &mut BcsWriter);

    fn to_bcs_bytes(&self) -> Vec<u8> {
        let mut writer = BcsWriter::new();
        self.write_bcs(&mut writer);
        writer.into_bytes()
    }
}

#[derive(Debug, Default)]
pub struct BcsWriter {
    buf: Vec<u8>,
}

impl BcsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn write_u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn write_u64(&mut self, v: u64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn write_bool(&mut self, v: bool) -> &mut Self {
        self.write_u8(v as u8)
    }

    pub fn write_uleb128(&mut self, mut v: u64) -> &mut Self {
        while v >= 0x80 {
            self.buf.push((v as u8 & 0x7f) | 0x80);
            v >>= 7;
        }
        self.buf.push(v as u8);
        self
    }

    /// 定长数组（地址、对象 ID），不带长度前缀
    pub fn write_fixed(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// vector<u8>：长度前缀 + 原始字节
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_uleb128(bytes.len() as u64);
        self.write_fixed(bytes)
    }

    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_variant(&mut self, index: u32) -> &mut Self {
        self.write_uleb128(index as u64)
    }

    pub fn write_seq<T: ToBcs>(&mut self, items: &[T]) -> &mut Self {
        self.write_uleb128(items.len() as u64);
        for item in items {
            item.write_bcs(self);
        }
        self
    }
}

impl ToBcs for u8 {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        writer.write_u8(*self);
    }
}

impl ToBcs for u64 {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        writer.write_u64(*self);
    }
}

impl ToBcs for bool {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        writer.write_bool(*self);
    }
}

impl ToBcs for str {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        writer.write_str(self);
    }
}

impl ToBcs for String {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        writer.write_str(self);
    }
}

impl<T: ToBcs> ToBcs for Vec<T> {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        writer.write_seq(self);
    }
}

impl<T: ToBcs + ?Sized> ToBcs for Box<T> {
    fn write_bcs(&self, writer: &mut BcsWriter) {
        (**self).write_bcs(writer);
    }
}
