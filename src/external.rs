use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use bytes::{Bytes, BytesMut};
use tracing::debug;

const READ_CHUNK: usize = 8 * 1024;

/// Runs `program` to completion and returns its interleaved stdout and stderr.
///
/// The child sees its base name as argument zero and `args` unmodified. A
/// non-zero exit status is an error and the captured output is discarded.
pub fn run_captured(program: &Path, args: &[String]) -> io::Result<Bytes> {
    let (mut reader, writer) = io::pipe()?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);
    set_arg0(&mut command, program);

    let mut child = command.spawn()?;
    // Our copies of the write end must be closed before the read can see EOF.
    drop(command);

    let output = read_all(&mut reader);
    let status = child.wait()?;
    let output = output?;
    debug!(program = %program.display(), %status, bytes = output.len(), "child exited");
    if !status.success() {
        return Err(io::Error::other(describe_failure(status)));
    }
    Ok(output)
}

fn describe_failure(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(signal) => format!("signal: {}", signal),
        None => status.to_string(),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(status: ExitStatus) -> String {
    status.to_string()
}

#[cfg(unix)]
fn set_arg0(command: &mut Command, program: &Path) {
    use std::os::unix::process::CommandExt;

    if let Some(name) = program.file_name() {
        command.arg0(name);
    }
}

#[cfg(not(unix))]
fn set_arg0(_command: &mut Command, _program: &Path) {}

fn read_all(reader: &mut impl Read) -> io::Result<Bytes> {
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(buf.freeze())
}
