use super::id::FilterId;

/// FFmpeg filter-graph expression equivalent to a still kernel
///
/// `None` means the filter has no video form and the source should be copied
/// without re-encoding.
pub fn video_expression(filter: &FilterId) -> Option<&'static str> {
    match filter {
        FilterId::Grayscale => Some("format=gray"),
        FilterId::Negative => Some("negate"),
        FilterId::Sepia => {
            Some("colorchannelmixer=.393:.769:.189:0:.349:.686:.168:0:.272:.534:.131")
        }
        FilterId::Posterize => {
            Some("lutrgb=r='floor(val/64)*64':g='floor(val/64)*64':b='floor(val/64)*64'")
        }
        FilterId::Solarize => Some("lutyuv=y='if(lt(val,128),val,255-val)'"),
        FilterId::Cold => Some("colorbalance=bs=0.35:rs=-0.25"),
        FilterId::Warm => Some("colorbalance=rs=0.35:bs=-0.25"),
        FilterId::Vintage => Some("curves=blue='0/0 0.5/0.4 1/1',vignette=PI/3"),
        FilterId::None | FilterId::Unknown(_) => None,
    }
}
