//! Project descriptor version bumper
//!
//! Increments the first `<AssemblyVersion>` and the first `<FileVersion>`
//! element of an MSBuild project file. Both fields are bumped independently
//! and the rest of the text is kept byte-for-byte.
//!
//! ```text
//! <AssemblyVersion>1.2.3</AssemblyVersion>   ->   <AssemblyVersion>1.2.4</AssemblyVersion>
//! <FileVersion>2.3.4</FileVersion>           ->   <FileVersion>2.3.5</FileVersion>
//! ```

use regex::Regex;

use crate::version::error::VersionError;
use crate::version::token::increment_version;

/// Descriptor text after bumping, plus the new value of each field that was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpedDescriptor {
    pub content: String,
    pub assembly_version: Option<String>,
    pub file_version: Option<String>,
}

pub struct DescriptorBumper {
    /// `<AssemblyVersion>1.2.3</AssemblyVersion>`
    assembly_version_re: Regex,
    /// `<FileVersion>1.2.3</FileVersion>`
    file_version_re: Regex,
}

impl DescriptorBumper {
    pub fn new() -> Self {
        Self {
            assembly_version_re: Regex::new(r"<AssemblyVersion>(.*?)</AssemblyVersion>").unwrap(),
            file_version_re: Regex::new(r"<FileVersion>(.*?)</FileVersion>").unwrap(),
        }
    }

    /// Bump both version fields. A missing field yields `None` for that field;
    /// a present field holding a malformed version is an error.
    pub fn bump(&self, content: &str) -> Result<BumpedDescriptor, VersionError> {
        let (content, assembly_version) =
            bump_element(&self.assembly_version_re, "AssemblyVersion", content)?;
        let (content, file_version) = bump_element(&self.file_version_re, "FileVersion", &content)?;

        Ok(BumpedDescriptor {
            content,
            assembly_version,
            file_version,
        })
    }
}

impl Default for DescriptorBumper {
    fn default() -> Self {
        Self::new()
    }
}

fn bump_element(
    re: &Regex,
    tag: &str,
    content: &str,
) -> Result<(String, Option<String>), VersionError> {
    let Some(captures) = re.captures(content) else {
        return Ok((content.to_string(), None));
    };
    let (Some(element), Some(value)) = (captures.get(0), captures.get(1)) else {
        return Ok((content.to_string(), None));
    };

    let new_version = increment_version(value.as_str())?;

    let mut updated = String::with_capacity(content.len() + 2);
    updated.push_str(&content[..element.start()]);
    updated.push_str(&format!("<{tag}>{new_version}</{tag}>"));
    updated.push_str(&content[element.end()..]);

    Ok((updated, Some(new_version)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSPROJ: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <RootNamespace>ConfusedPolarBear.Plugin.IntroSkipper</RootNamespace>
    <AssemblyVersion>1.10.10.4</AssemblyVersion>
    <FileVersion>1.10.10.4</FileVersion>
    <Nullable>enable</Nullable>
  </PropertyGroup>
</Project>
"#;

    #[test]
    fn bump_increments_both_fields() {
        let result = DescriptorBumper::new().bump(CSPROJ).unwrap();

        assert_eq!(result.assembly_version.as_deref(), Some("1.10.10.5"));
        assert_eq!(result.file_version.as_deref(), Some("1.10.10.5"));
        assert_eq!(
            result.content,
            CSPROJ.replace("1.10.10.4", "1.10.10.5"),
        );
    }

    #[test]
    fn bump_handles_fields_independently() {
        let input =
            "<AssemblyVersion>1.2.3</AssemblyVersion><FileVersion>2.3.4</FileVersion>";
        let result = DescriptorBumper::new().bump(input).unwrap();

        assert_eq!(
            result.content,
            "<AssemblyVersion>1.2.4</AssemblyVersion><FileVersion>2.3.5</FileVersion>"
        );
        assert_eq!(result.assembly_version.as_deref(), Some("1.2.4"));
        assert_eq!(result.file_version.as_deref(), Some("2.3.5"));
    }

    #[test]
    fn bump_leaves_missing_field_empty() {
        let input = "<PropertyGroup><FileVersion>1.0.9</FileVersion></PropertyGroup>";
        let result = DescriptorBumper::new().bump(input).unwrap();

        assert_eq!(result.assembly_version, None);
        assert_eq!(result.file_version.as_deref(), Some("1.0.10"));
        assert_eq!(
            result.content,
            "<PropertyGroup><FileVersion>1.0.10</FileVersion></PropertyGroup>"
        );
    }

    #[test]
    fn bump_without_any_field_is_unchanged() {
        let input = "<Project></Project>";
        let result = DescriptorBumper::new().bump(input).unwrap();

        assert_eq!(result.content, input);
        assert_eq!(result.assembly_version, None);
        assert_eq!(result.file_version, None);
    }

    #[test]
    fn bump_touches_only_first_occurrence() {
        let input = "<FileVersion>1.0.0</FileVersion>\n<FileVersion>1.0.0</FileVersion>";
        let result = DescriptorBumper::new().bump(input).unwrap();

        assert_eq!(
            result.content,
            "<FileVersion>1.0.1</FileVersion>\n<FileVersion>1.0.0</FileVersion>"
        );
    }

    #[test]
    fn bump_rejects_malformed_version() {
        let input = "<AssemblyVersion>1.0.$(Build)</AssemblyVersion>";
        let result = DescriptorBumper::new().bump(input);

        assert!(matches!(
            result,
            Err(VersionError::InvalidSegment { segment, .. }) if segment == "$(Build)"
        ));
    }
}
