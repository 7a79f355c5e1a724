use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Numeric precisions understood by the accelerator toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "int8")]
    I8,
    #[serde(rename = "int32")]
    I32,
    #[serde(rename = "int64")]
    I64,
    #[serde(rename = "uint8")]
    U8,
    #[serde(rename = "float16")]
    F16,
    #[serde(rename = "bfloat16")]
    BF16,
    #[serde(rename = "float32")]
    F32,
}

impl DType {
    /// Parse a dtype from its toolchain identifier string.
    pub fn from_ident(ident: &str) -> Result<Self> {
        match ident {
            "bool" => Ok(DType::Bool),
            "int8" => Ok(DType::I8),
            "int32" => Ok(DType::I32),
            "int64" => Ok(DType::I64),
            "uint8" => Ok(DType::U8),
            "float16" => Ok(DType::F16),
            "bfloat16" => Ok(DType::BF16),
            "float32" => Ok(DType::F32),
            other => Err(anyhow!("unknown dtype identifier: {}", other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::I8 => "int8",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::U8 => "uint8",
            DType::F16 => "float16",
            DType::BF16 => "bfloat16",
            DType::F32 => "float32",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F16 | DType::BF16 | DType::F32)
    }

    /// Width of one element in bits.
    pub fn bit_width(self) -> usize {
        match self {
            DType::Bool | DType::I8 | DType::U8 => 8,
            DType::F16 | DType::BF16 => 16,
            DType::I32 | DType::F32 => 32,
            DType::I64 => 64,
        }
    }
}

/// Memory arrangement of a tensor's elements, independent of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "DefaultFormat")]
    Default,
    /// 5-dimension blocked layout (N, C1, H, W, C0).
    #[serde(rename = "NC1HWC0")]
    Nc1hwc0,
    /// Fractal layout for matrix units, Z-ordered within fractals.
    #[serde(rename = "FRACTAL_NZ")]
    FracNz,
    #[serde(rename = "FRACTAL_Z")]
    FracZ,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Default => "DefaultFormat",
            Format::Nc1hwc0 => "NC1HWC0",
            Format::FracNz => "FRACTAL_NZ",
            Format::FracZ => "FRACTAL_Z",
        }
    }
}

/// A (precision, memory format) pair as it appears in kernel signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataLayout {
    pub dtype: DType,
    pub format: Format,
}

impl DataLayout {
    pub const fn new(dtype: DType, format: Format) -> Self {
        Self { dtype, format }
    }

    pub const F16_DEFAULT: Self = Self::new(DType::F16, Format::Default);
    pub const F16_5HD: Self = Self::new(DType::F16, Format::Nc1hwc0);
    pub const F16_FRACNZ: Self = Self::new(DType::F16, Format::FracNz);
    pub const F16_FRACZ: Self = Self::new(DType::F16, Format::FracZ);
    pub const F32_DEFAULT: Self = Self::new(DType::F32, Format::Default);
    pub const F32_5HD: Self = Self::new(DType::F32, Format::Nc1hwc0);
    pub const F32_FRACNZ: Self = Self::new(DType::F32, Format::FracNz);
}

impl std::fmt::Display for DataLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dtype.as_str(), self.format.as_str())
    }
}
