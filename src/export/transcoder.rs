use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::EncoderConfig;
use crate::error::TranscodeError;

/// Lines of encoder stderr kept in error reports
const STDERR_TAIL_LINES: usize = 8;

/// Capability to re-encode a video through a filter expression
///
/// Called from a blocking worker thread; implementations may block until the
/// encode has finished.
pub trait VideoTranscoder: Send + Sync {
    /// Whether the backend can run at all (e.g. the binary was found)
    fn is_available(&self) -> bool;

    /// Encode `input` into `output` through `filter_expr`
    fn transcode(&self, filter_expr: &str, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

/// Runs the `ffmpeg` command-line encoder
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: Option<PathBuf>,
    settings: EncoderConfig,
}

impl FfmpegTranscoder {
    /// Locate the configured binary once; a missing binary makes the
    /// transcoder unavailable rather than failing construction
    pub fn from_config(settings: &EncoderConfig) -> Self {
        let binary = locate_binary(&settings.binary);
        match &binary {
            Some(path) => debug!("Using encoder at {:?}", path),
            None => debug!("Encoder '{}' not found on PATH", settings.binary),
        }
        Self {
            binary,
            settings: settings.clone(),
        }
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    /// Full argument list for one encode
    pub fn arguments(&self, filter_expr: &str, input: &Path, output: &Path) -> Vec<OsString> {
        let audio_codec = if self.settings.copy_audio { "copy" } else { "aac" };
        vec![
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-vf".into(),
            filter_expr.into(),
            "-c:v".into(),
            self.settings.video_codec.clone().into(),
            "-preset".into(),
            self.settings.preset.clone().into(),
            "-crf".into(),
            self.settings.crf.to_string().into(),
            "-c:a".into(),
            audio_codec.into(),
            output.as_os_str().to_owned(),
        ]
    }
}

impl VideoTranscoder for FfmpegTranscoder {
    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn transcode(&self, filter_expr: &str, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let binary = self.binary.as_ref().ok_or(TranscodeError::Unavailable)?;

        let result = Command::new(binary)
            .args(self.arguments(filter_expr, input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| TranscodeError::Spawn {
                binary: binary.display().to_string(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
            return Err(TranscodeError::Failed {
                code: result.status.code(),
                stderr: tail,
            });
        }

        Ok(())
    }
}

/// Resolve an encoder name against PATH; names containing a separator are
/// taken as paths. Only executable files count.
fn locate_binary(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable() -> FfmpegTranscoder {
        FfmpegTranscoder::from_config(&EncoderConfig {
            binary: "/nonexistent/dir/ffmpeg-missing".to_string(),
            ..EncoderConfig::default()
        })
    }

    #[test]
    fn test_argument_contract() {
        let transcoder = unavailable();
        let args = transcoder.arguments("negate", Path::new("in.mp4"), Path::new("out/x.mp4"));
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-y", "-i", "in.mp4", "-vf", "negate", "-c:v", "libx264", "-preset",
                "veryfast", "-crf", "22", "-c:a", "copy", "out/x.mp4",
            ]
        );
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let transcoder = unavailable();

        assert!(!transcoder.is_available());
        assert!(transcoder.binary().is_none());
        assert!(matches!(
            transcoder.transcode("negate", Path::new("a.mp4"), Path::new("b.mp4")),
            Err(TranscodeError::Unavailable)
        ));
    }

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn with_binary(binary: &Path) -> FfmpegTranscoder {
        FfmpegTranscoder::from_config(&EncoderConfig {
            binary: binary.display().to_string(),
            ..EncoderConfig::default()
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_explicit_path_is_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let fake = script(dir.path(), "encoder", "#!/bin/sh\nexit 0\n");

        let transcoder = with_binary(&fake);
        assert!(transcoder.is_available());
        assert!(transcoder.binary().unwrap().ends_with("encoder"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_unavailable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffmpeg");
        std::fs::write(&fake, b"#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o644)).unwrap();

        let transcoder = with_binary(&fake);
        assert!(!transcoder.is_available());
        assert!(matches!(
            transcoder.transcode("negate", Path::new("a.mp4"), Path::new("b.mp4")),
            Err(TranscodeError::Unavailable)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_keeps_stderr_tail() {
        let dir = tempfile::tempdir().unwrap();
        let fake = script(
            dir.path(),
            "failing-encoder",
            "#!/bin/sh\nfor i in 1 2 3 4 5 6 7 8 9 10 11 12; do echo \"line $i\" >&2; done\nexit 3\n",
        );

        let result = with_binary(&fake).transcode(
            "negate",
            &dir.path().join("in.mp4"),
            &dir.path().join("out.mp4"),
        );

        match result {
            Err(TranscodeError::Failed { code, stderr }) => {
                assert_eq!(code, Some(3));
                let lines: Vec<&str> = stderr.lines().collect();
                assert_eq!(lines.len(), STDERR_TAIL_LINES);
                assert_eq!(lines.first(), Some(&"line 5"));
                assert_eq!(lines.last(), Some(&"line 12"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unstartable_encoder_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let fake = script(dir.path(), "broken-encoder", "#!/nonexistent/interpreter\n");

        let transcoder = with_binary(&fake);
        assert!(transcoder.is_available());

        let result = transcoder.transcode(
            "negate",
            &dir.path().join("in.mp4"),
            &dir.path().join("out.mp4"),
        );
        assert!(matches!(result, Err(TranscodeError::Spawn { .. })));
    }
}
