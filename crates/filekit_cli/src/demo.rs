//! Runs every filesystem operation in sequence and reports to a writer.

use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Result;
use chrono::{DateTime, Local};
use filekit_io_fs::{
    FsError, append_bytes, append_text, copy_file, inspect, probe_content_type, read_all_bytes,
    read_all_lines, read_chunked, read_line_by_line, read_lines, walk_with, write_lines,
};
use tracing::info;

use crate::config::{SpecDemoConfig, SpecDemoPaths};

const L_LINES_OUTPUT: [&str; 3] = [
    "This is a line of text.",
    "This is another line of uninspired text.",
    "I could go on...",
];
const C_APPEND_BYTES: &str = "This is a line to append";
const C_APPEND_TEXT: &str = "This line was appended through a buffered writer";

/// Inspect, walk, read, write and copy; stops at the first failure.
pub fn run_demo<W: Write>(spec_demo_config: &SpecDemoConfig, out: &mut W) -> Result<()> {
    let spec_demo_paths = &spec_demo_config.spec_demo_paths;
    display_file_information(spec_demo_paths, out)?;
    walk_tree(spec_demo_config, out)?;
    read_files(spec_demo_paths, spec_demo_config.n_chunk_size, out)?;
    write_files(spec_demo_paths, out)?;
    copy_files(spec_demo_paths, out)?;
    info!("demo finished");
    Ok(())
}

fn display_file_information<W: Write>(spec_demo_paths: &SpecDemoPaths, out: &mut W) -> Result<()> {
    writeln!(out, "--Displaying some file information--")?;
    let path_text = &spec_demo_paths.path_input_text;
    let name_text = path_text.display();
    let spec_meta = inspect(path_text)?;

    writeln!(out, "Does file {name_text} exist? {}", spec_meta.if_exists)?;
    writeln!(out, "Does file {name_text} not exist? {}", !spec_meta.if_exists)?;
    writeln!(out, "Is {name_text} a directory? {}", spec_meta.if_is_dir)?;
    writeln!(out, "Is {name_text} a regular file? {}", spec_meta.if_is_file)?;
    if !spec_meta.if_exists {
        return Err(FsError::NotFound {
            path: path_text.clone(),
        }
        .into());
    }

    writeln!(
        out,
        "{name_text} permissions (rwx): {} {} {}",
        spec_meta.if_readable, spec_meta.if_writable, spec_meta.if_executable
    )?;
    writeln!(
        out,
        "{name_text} was last modified on {}",
        format_time(spec_meta.time_modified)
    )?;
    writeln!(out, "Size of {name_text}: {} bytes", spec_meta.n_size_bytes)?;
    writeln!(
        out,
        "{name_text} content type is {}",
        spec_meta.content_type.as_deref().unwrap_or("unknown")
    )?;

    let path_binary = &spec_demo_paths.path_input_binary;
    writeln!(
        out,
        "{} content type is {}",
        path_binary.display(),
        probe_content_type(path_binary).as_deref().unwrap_or("unknown")
    )?;
    writeln!(out)?;
    Ok(())
}

fn walk_tree<W: Write>(spec_demo_config: &SpecDemoConfig, out: &mut W) -> Result<()> {
    writeln!(out, "--Demonstrating walk functionality--")?;
    let iter_walk = walk_with(
        &spec_demo_config.spec_demo_paths.path_walk_root,
        spec_demo_config.spec_walk_options.clone(),
    )?;
    for res_entry in iter_walk {
        writeln!(out, "{}", res_entry?.path.display())?;
    }
    writeln!(out)?;
    Ok(())
}

fn read_files<W: Write>(
    spec_demo_paths: &SpecDemoPaths,
    n_chunk_size: usize,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "--Reading from files--")?;
    let path_text = &spec_demo_paths.path_input_text;

    writeln!(out, "Using 'read_lines'")?;
    for line in read_lines(path_text)? {
        writeln!(out, "{}", line?)?;
    }
    writeln!(out)?;

    writeln!(out, "Using 'read_all_lines'")?;
    for line in read_all_lines(path_text)? {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    writeln!(out, "Using 'read_line_by_line'")?;
    let mut line_cursor = read_line_by_line(path_text)?;
    while let Some(line) = line_cursor.next_line()? {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    let path_binary = &spec_demo_paths.path_input_binary;
    writeln!(out, "Using 'read_all_bytes'")?;
    let raw_binary = read_all_bytes(path_binary)?;
    writeln!(
        out,
        "Binary file {} contains {} bytes",
        path_binary.display(),
        raw_binary.len()
    )?;
    writeln!(out)?;

    writeln!(out, "Using 'read_chunked'")?;
    let mut iter_chunks = read_chunked(path_binary, n_chunk_size)?;
    for chunk in iter_chunks.by_ref() {
        chunk?;
    }
    writeln!(
        out,
        "Read all the bytes in {} times through our loop",
        iter_chunks.cnt_chunks()
    )?;
    writeln!(out)?;
    Ok(())
}

fn write_files<W: Write>(spec_demo_paths: &SpecDemoPaths, out: &mut W) -> Result<()> {
    writeln!(out, "--Writing to files--")?;
    let path_output = &spec_demo_paths.path_output_text;

    write_lines(path_output, L_LINES_OUTPUT)?;
    append_bytes(path_output, C_APPEND_BYTES.as_bytes())?;
    append_text(path_output, C_APPEND_TEXT)?;

    writeln!(
        out,
        "Wrote {} lines and 2 appends to {}",
        L_LINES_OUTPUT.len(),
        path_output.display()
    )?;
    writeln!(out)?;
    Ok(())
}

fn copy_files<W: Write>(spec_demo_paths: &SpecDemoPaths, out: &mut W) -> Result<()> {
    writeln!(out, "--Copying files--")?;
    for (path_src, path_dst) in [
        (
            &spec_demo_paths.path_input_text,
            &spec_demo_paths.path_copied_text,
        ),
        (
            &spec_demo_paths.path_input_binary,
            &spec_demo_paths.path_copied_binary,
        ),
    ] {
        let path_resolved = copy_file(path_src, path_dst, true)?;
        report_copy(path_src, &path_resolved, out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn report_copy<W: Write>(path_src: &Path, path_resolved: &Path, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Copied {} to {}",
        path_src.display(),
        path_resolved.display()
    )?;
    Ok(())
}

fn format_time(time_modified: Option<SystemTime>) -> String {
    match time_modified {
        Some(t) => DateTime::<Local>::from(t)
            .format("%a %b %d %H:%M:%S %Y")
            .to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use filekit_io_fs::EnumFsErrorKind;
    use filekit_io_fs::FsError;
    use tempfile::TempDir;

    use super::{format_time, run_demo};
    use crate::config::{
        C_PATH_COPIED_BINARY_DEFAULT, C_PATH_COPIED_TEXT_DEFAULT, C_PATH_INPUT_BINARY_DEFAULT,
        C_PATH_INPUT_TEXT_DEFAULT, C_PATH_OUTPUT_TEXT_DEFAULT, SpecDemoConfig, SpecDemoPaths,
    };

    const RAW_JPEG_HEAD: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    fn seed_inputs(path_dir: &Path) {
        fs::write(path_dir.join("exampleInput.txt"), "first line\nsecond line\n").expect("seed text");
        let mut raw = RAW_JPEG_HEAD.to_vec();
        raw.resize(2500, 0xAB);
        fs::write(path_dir.join("coffee.jpg"), raw).expect("seed binary");
    }

    fn config_under(path_dir: &Path) -> SpecDemoConfig {
        SpecDemoConfig {
            spec_demo_paths: SpecDemoPaths {
                path_input_text: path_dir.join(C_PATH_INPUT_TEXT_DEFAULT),
                path_output_text: path_dir.join(C_PATH_OUTPUT_TEXT_DEFAULT),
                path_input_binary: path_dir.join(C_PATH_INPUT_BINARY_DEFAULT),
                path_copied_text: path_dir.join(C_PATH_COPIED_TEXT_DEFAULT),
                path_copied_binary: path_dir.join(C_PATH_COPIED_BINARY_DEFAULT),
                path_walk_root: path_dir.to_path_buf(),
            },
            ..SpecDemoConfig::default()
        }
    }

    #[test]
    fn run_demo_reports_every_step() {
        let tmp = TempDir::new().expect("tempdir");
        seed_inputs(tmp.path());

        let mut out = Vec::new();
        run_demo(&config_under(tmp.path()), &mut out).expect("run demo");
        let txt_out = String::from_utf8(out).expect("utf8 output");

        assert!(txt_out.contains("exist? true"));
        assert!(txt_out.contains("a regular file? true"));
        assert!(txt_out.contains("Size of"));
        assert!(txt_out.contains("content type is text/plain"));
        assert!(txt_out.contains("content type is image/jpeg"));
        assert!(txt_out.contains("second line"));
        assert!(txt_out.contains("contains 2500 bytes"));
        assert!(txt_out.contains("Read all the bytes in 3 times through our loop"));
        assert!(txt_out.contains("Copied"));
        for c_header in [
            "--Displaying some file information--",
            "--Demonstrating walk functionality--",
            "--Reading from files--",
            "--Writing to files--",
            "--Copying files--",
        ] {
            assert!(txt_out.contains(c_header), "{c_header}");
        }
    }

    #[test]
    fn run_demo_writes_and_copies_files() {
        let tmp = TempDir::new().expect("tempdir");
        seed_inputs(tmp.path());

        run_demo(&config_under(tmp.path()), &mut Vec::new()).expect("run demo");

        let txt_written =
            fs::read_to_string(tmp.path().join("exampleOutput.txt")).expect("read output");
        assert_eq!(
            txt_written,
            "This is a line of text.\nThis is another line of uninspired text.\nI could go on...\n\
             This is a line to appendThis line was appended through a buffered writer"
        );
        assert_eq!(
            fs::read(tmp.path().join("copiedText.txt")).expect("read copy"),
            fs::read(tmp.path().join("exampleInput.txt")).expect("read input")
        );
        assert_eq!(
            fs::read(tmp.path().join("secondCup.jpg")).expect("read copy"),
            fs::read(tmp.path().join("coffee.jpg")).expect("read input")
        );
    }

    #[test]
    fn run_demo_twice_overwrites_previous_outputs() {
        let tmp = TempDir::new().expect("tempdir");
        seed_inputs(tmp.path());
        let spec_demo_config = config_under(tmp.path());

        run_demo(&spec_demo_config, &mut Vec::new()).expect("first run");
        run_demo(&spec_demo_config, &mut Vec::new()).expect("second run");

        let l_lines = fs::read_to_string(tmp.path().join("exampleOutput.txt"))
            .expect("read output")
            .lines()
            .count();
        assert_eq!(l_lines, 4);
    }

    #[test]
    fn run_demo_stops_on_missing_input() {
        let tmp = TempDir::new().expect("tempdir");

        let mut out = Vec::new();
        let err = run_demo(&config_under(tmp.path()), &mut out).expect_err("missing input");
        let fs_err = err.downcast_ref::<FsError>().expect("filesystem error");
        assert_eq!(fs_err.kind(), EnumFsErrorKind::NotFound);

        let txt_out = String::from_utf8(out).expect("utf8 output");
        assert!(txt_out.contains("not exist? true"));
        assert!(!txt_out.contains("--Demonstrating walk functionality--"));
        assert!(!tmp.path().join("exampleOutput.txt").exists());
    }

    #[test]
    fn run_demo_rejects_zero_chunk_size() {
        let tmp = TempDir::new().expect("tempdir");
        seed_inputs(tmp.path());
        let spec_demo_config = SpecDemoConfig {
            n_chunk_size: 0,
            ..config_under(tmp.path())
        };

        let err = run_demo(&spec_demo_config, &mut Vec::new()).expect_err("zero chunk size");
        let fs_err = err.downcast_ref::<FsError>().expect("filesystem error");
        assert_eq!(fs_err.kind(), EnumFsErrorKind::InvalidInput);
    }

    #[test]
    fn missing_time_is_unknown() {
        assert_eq!(format_time(None), "unknown");
    }
}
