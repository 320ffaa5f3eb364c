//! Conversion options and their builder.

use crate::error::ConvertError;
use dds_convert_codecs::Codec;
use dds_convert_common::DxgiFormat;
use dds_convert_transform::{NormalMapChannel, NormalMapFlags};

/// Revision of the conversion pipeline to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineProfile {
    /// Typeless formats are resolved as the caller asks; the target size is ignored.
    Standard,
    /// Typeless formats are always resolved as FLOAT; images can be resized.
    #[default]
    Extended,
}

impl PipelineProfile {
    /// Converts the value used by the C interface (`0` = Extended, `1` = Standard).
    pub const fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Extended),
            1 => Some(Self::Standard),
            _ => None,
        }
    }

    /// Whether the resize stage runs under this profile.
    pub const fn can_resize(self) -> bool {
        matches!(self, Self::Extended)
    }
}

/// How a typeless format is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypelessPreference {
    Unorm,
    Float,
}

/// Options for [`convert`](crate::convert).
///
/// Every field is optional; the default options decode the texture into its own format (after
/// decompression) and write a PNG.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Format to convert to. `None` keeps the format the texture has after decompression.
    pub format: Option<DxgiFormat>,
    /// Size to resize to. Only used when both are set.
    pub width: Option<usize>,
    pub height: Option<usize>,
    /// Normal map options, e.g. `"rmo"`. See [`parse_normal_map_options`].
    pub normal_map: Option<String>,
    pub typeless_unorm: bool,
    pub typeless_float: bool,
    pub codec: Codec,
    pub profile: PipelineProfile,
}

impl ConversionOptions {
    /// Create a new options builder.
    pub fn builder() -> ConversionOptionsBuilder {
        ConversionOptionsBuilder::default()
    }

    /// Resolves the typeless preference for the profile.
    ///
    /// # Returns
    ///
    /// `None` when the [`PipelineProfile::Standard`] profile has neither or both of
    /// [`Self::typeless_unorm`] and [`Self::typeless_float`] set.
    pub fn typeless_preference(&self) -> Option<TypelessPreference> {
        match (self.profile, self.typeless_unorm, self.typeless_float) {
            (PipelineProfile::Extended, _, _) => Some(TypelessPreference::Float),
            (PipelineProfile::Standard, true, false) => Some(TypelessPreference::Unorm),
            (PipelineProfile::Standard, false, true) => Some(TypelessPreference::Float),
            (PipelineProfile::Standard, _, _) => None,
        }
    }

    /// The requested size, if both dimensions are set.
    pub fn target_size(&self) -> Option<(usize, usize)> {
        self.width.zip(self.height)
    }

    /// Parses the normal map options, if any.
    ///
    /// # Errors
    ///
    /// See [`parse_normal_map_options`].
    pub fn normal_map_flags(&self) -> Result<Option<NormalMapFlags>, ConvertError> {
        match self.normal_map.as_deref() {
            None | Some("") => Ok(None),
            Some(options) => parse_normal_map_options(options).map(Some),
        }
    }
}

/// Builder for [`ConversionOptions`].
#[derive(Debug, Clone, Default)]
pub struct ConversionOptionsBuilder {
    options: ConversionOptions,
}

impl ConversionOptionsBuilder {
    /// Create a new options builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the format to convert to.
    pub fn format(mut self, format: DxgiFormat) -> Self {
        self.options.format = Some(format);
        self
    }

    /// Set the size to resize to.
    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.options.width = Some(width);
        self.options.height = Some(height);
        self
    }

    /// Set the normal map options.
    pub fn normal_map(mut self, options: impl Into<String>) -> Self {
        self.options.normal_map = Some(options.into());
        self
    }

    /// Set how typeless formats are interpreted under [`PipelineProfile::Standard`].
    pub fn typeless(mut self, preference: TypelessPreference) -> Self {
        self.options.typeless_unorm = preference == TypelessPreference::Unorm;
        self.options.typeless_float = preference == TypelessPreference::Float;
        self
    }

    /// Set the output codec.
    pub fn codec(mut self, codec: Codec) -> Self {
        self.options.codec = codec;
        self
    }

    /// Set the pipeline profile.
    pub fn profile(mut self, profile: PipelineProfile) -> Self {
        self.options.profile = profile;
        self
    }

    /// Build the options.
    pub fn build(self) -> ConversionOptions {
        self.options
    }
}

/// Parses a normal map option string.
///
/// Exactly one channel letter must be present: `l` (luminance), `r`, `g`, `b` or `a`. The other
/// letters are flags:
///
/// - `m`: mirror in both directions; otherwise `u` and `v` mirror horizontally and vertically.
/// - `i`: invert the sign of the normals.
/// - `o`: store an occlusion term in alpha.
///
/// Unknown letters are ignored.
///
/// # Errors
///
/// - [`ConvertError::MissingNormalMapChannel`] if there is no channel letter.
/// - [`ConvertError::DuplicateNormalMapChannel`] if there is more than one.
pub fn parse_normal_map_options(options: &str) -> Result<NormalMapFlags, ConvertError> {
    const CHANNELS: [(char, NormalMapChannel); 5] = [
        ('l', NormalMapChannel::Luminance),
        ('r', NormalMapChannel::Red),
        ('g', NormalMapChannel::Green),
        ('b', NormalMapChannel::Blue),
        ('a', NormalMapChannel::Alpha),
    ];

    let mut selected = CHANNELS
        .iter()
        .filter(|(letter, _)| options.contains(*letter))
        .map(|&(_, channel)| channel);

    let channel = selected
        .next()
        .ok_or_else(|| ConvertError::MissingNormalMapChannel(options.to_owned()))?;
    if selected.next().is_some() {
        return Err(ConvertError::DuplicateNormalMapChannel(options.to_owned()));
    }

    let mirror = options.contains('m');
    Ok(NormalMapFlags {
        channel,
        mirror_u: mirror || options.contains('u'),
        mirror_v: mirror || options.contains('v'),
        invert_sign: options.contains('i'),
        compute_occlusion: options.contains('o'),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn builder() {
        let options = ConversionOptions::builder()
            .format(DxgiFormat::B8G8R8A8Unorm)
            .size(8, 16)
            .normal_map("r")
            .typeless(TypelessPreference::Unorm)
            .codec(Codec::Jpeg)
            .profile(PipelineProfile::Standard)
            .build();

        assert_eq!(options.format, Some(DxgiFormat::B8G8R8A8Unorm));
        assert_eq!(options.target_size(), Some((8, 16)));
        assert_eq!(options.normal_map.as_deref(), Some("r"));
        assert!(options.typeless_unorm && !options.typeless_float);
        assert_eq!(options.codec, Codec::Jpeg);
        assert_eq!(options.profile, PipelineProfile::Standard);
    }

    #[test]
    fn defaults_keep_everything() {
        let options = ConversionOptions::default();
        assert_eq!(options.format, None);
        assert_eq!(options.target_size(), None);
        assert_eq!(options.codec, Codec::Png);
        assert_eq!(options.profile, PipelineProfile::Extended);
        assert_eq!(options.normal_map_flags().unwrap(), None);
    }

    #[rstest]
    #[case(PipelineProfile::Standard, true, false, Some(TypelessPreference::Unorm))]
    #[case(PipelineProfile::Standard, false, true, Some(TypelessPreference::Float))]
    #[case(PipelineProfile::Standard, false, false, None)]
    #[case(PipelineProfile::Standard, true, true, None)]
    #[case(PipelineProfile::Extended, true, false, Some(TypelessPreference::Float))]
    #[case(PipelineProfile::Extended, false, false, Some(TypelessPreference::Float))]
    fn resolves_typeless_preference(
        #[case] profile: PipelineProfile,
        #[case] typeless_unorm: bool,
        #[case] typeless_float: bool,
        #[case] expected: Option<TypelessPreference>,
    ) {
        let options = ConversionOptions {
            profile,
            typeless_unorm,
            typeless_float,
            ..Default::default()
        };
        assert_eq!(options.typeless_preference(), expected);
    }

    #[rstest]
    #[case("l", NormalMapChannel::Luminance, false, false, false, false)]
    #[case("r", NormalMapChannel::Red, false, false, false, false)]
    #[case("gm", NormalMapChannel::Green, true, true, false, false)]
    #[case("bu", NormalMapChannel::Blue, true, false, false, false)]
    #[case("av", NormalMapChannel::Alpha, false, true, false, false)]
    #[case("rio", NormalMapChannel::Red, false, false, true, true)]
    #[case("xyzr", NormalMapChannel::Red, false, false, false, false)]
    fn parses_normal_map_options(
        #[case] options: &str,
        #[case] channel: NormalMapChannel,
        #[case] mirror_u: bool,
        #[case] mirror_v: bool,
        #[case] invert_sign: bool,
        #[case] compute_occlusion: bool,
    ) {
        assert_eq!(
            parse_normal_map_options(options).unwrap(),
            NormalMapFlags {
                channel,
                mirror_u,
                mirror_v,
                invert_sign,
                compute_occlusion,
            }
        );
    }

    #[rstest]
    #[case("x")]
    #[case("mio")]
    fn rejects_missing_channel(#[case] options: &str) {
        assert!(matches!(
            parse_normal_map_options(options),
            Err(ConvertError::MissingNormalMapChannel(o)) if o == options
        ));
    }

    #[rstest]
    #[case("rg")]
    #[case("la")]
    fn rejects_multiple_channels(#[case] options: &str) {
        assert!(matches!(
            parse_normal_map_options(options),
            Err(ConvertError::DuplicateNormalMapChannel(_))
        ));
    }

    #[rstest]
    #[case(0, Some(PipelineProfile::Extended))]
    #[case(1, Some(PipelineProfile::Standard))]
    #[case(2, None)]
    fn profile_from_raw(#[case] value: u32, #[case] expected: Option<PipelineProfile>) {
        assert_eq!(PipelineProfile::from_raw(value), expected);
    }
}
