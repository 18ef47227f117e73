use serde::{Deserialize, Serialize};

// 资料类型
//
// note 的 content 是正文，link 的 content 是 URL，
// pdf 的 content 是上传后生成的存储文件名。
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Note, // 笔记
    Link, // 链接
    Pdf,  // PDF 文件
}

impl MaterialType {
    pub const NOTE: &'static str = "note";
    pub const LINK: &'static str = "link";
    pub const PDF: &'static str = "pdf";
}

impl<'de> Deserialize<'de> for MaterialType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<MaterialType>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialType::Note => write!(f, "{}", MaterialType::NOTE),
            MaterialType::Link => write!(f, "{}", MaterialType::LINK),
            MaterialType::Pdf => write!(f, "{}", MaterialType::PDF),
        }
    }
}

impl std::str::FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(MaterialType::Note),
            "link" => Ok(MaterialType::Link),
            "pdf" => Ok(MaterialType::Pdf),
            _ => Err(format!(
                "无效的资料类型: '{s}'. 支持的类型: note, link, pdf"
            )),
        }
    }
}

// 课程资料实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub material_type: MaterialType,
    pub content: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_material_type_round_trip() {
        for t in [MaterialType::Note, MaterialType::Link, MaterialType::Pdf] {
            assert_eq!(MaterialType::from_str(&t.to_string()).unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_material_type_rejected() {
        assert!(MaterialType::from_str("video").is_err());
    }
}
