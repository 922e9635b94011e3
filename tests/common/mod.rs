//! A stand-in for the `exif` binary, written as a shell script.
//!
//! The fake treats an "image" as a text file of `Name=Value` lines and
//! honours the same invocation forms as the real tool:
//!
//! - `-x FILE` prints the lines as a flat `<exif>` XML dump
//! - `FILE` prints a table, plus the thumbnail line when `FILE.thumb` exists
//!   (`FILE.info`, when present, is printed verbatim instead)
//! - `--extract-thumbnail -o OUT FILE` copies `FILE.thumb` to `OUT`
//! - `--create-exif ... --set-value V FILE` sets a tag in `FILE`, the `-o`
//!   target, or the `--output` target
//!
//! If `FILE.fail` exists, every invocation prints `Reading FILE` to stdout,
//! the contents of `FILE.fail` to stderr, and exits with status 1.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

const FAKE_EXIF: &str = r#"#!/bin/sh
mode=info
output=""
target_o=""
tag=""
value=""
file=""
while [ $# -gt 0 ]; do
    case "$1" in
        --version) echo "0.6.22-fake"; exit 0 ;;
        -x) mode=xml ;;
        --extract-thumbnail) mode=thumb ;;
        --create-exif) mode=set ;;
        --output) output="$2"; shift ;;
        -o) target_o="$2"; shift ;;
        --tag) tag="$2"; shift ;;
        --ifd) shift ;;
        --set-value) value="$2"; shift ;;
        *) file="$1" ;;
    esac
    shift
done

if [ -f "$file.fail" ]; then
    printf 'Reading %s\n' "$file"
    cat "$file.fail" >&2
    exit 1
fi
if [ ! -f "$file" ]; then
    printf "Could not open '%s'\n" "$file" >&2
    exit 1
fi

case "$mode" in
    xml)
        printf '<exif>\n'
        while IFS='=' read -r name val; do
            printf '\t<%s>%s</%s>\n' "$name" "$val" "$name"
        done < "$file"
        printf '</exif>\n'
        ;;
    info)
        if [ -f "$file.info" ]; then
            cat "$file.info"
            exit 0
        fi
        printf "EXIF tags in '%s':\n" "$file"
        while IFS='=' read -r name val; do
            printf '%-20s|%s\n' "$name" "$val"
        done < "$file"
        if [ -f "$file.thumb" ]; then
            printf 'EXIF data contains a thumbnail (%s bytes).\n' "$(wc -c < "$file.thumb" | tr -d ' ')"
        fi
        ;;
    thumb)
        if [ ! -f "$file.thumb" ]; then
            printf "'%s' does not contain a thumbnail!\n" "$file" >&2
            exit 1
        fi
        cp "$file.thumb" "$target_o"
        ;;
    set)
        target="$file"
        if [ -n "$target_o" ]; then target="$target_o"; fi
        if [ -n "$output" ]; then target="$output"; fi
        grep -v "^$tag=" "$file" > "$target.tmp" || true
        printf '%s=%s\n' "$tag" "$value" >> "$target.tmp"
        mv "$target.tmp" "$target"
        ;;
esac
"#;

static FAKE_EXIF_SCRIPT: OnceLock<(TempDir, PathBuf)> = OnceLock::new();

/// Path to the fake `exif` script, created on first use.
pub fn fake_exif() -> &'static Path {
    let (_, script) = FAKE_EXIF_SCRIPT.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("exif");
        fs::write(&script, FAKE_EXIF).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        (dir, script)
    });
    script
}

/// The fake program as a string, for `ExifTool::with_program`.
pub fn fake_program() -> String {
    fake_exif().to_string_lossy().into_owned()
}

/// Write a fake image holding the given tags.
pub fn write_image(dir: &Path, name: &str, tags: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let body: String = tags
        .iter()
        .map(|(tag, value)| format!("{tag}={value}\n"))
        .collect();
    fs::write(&path, body).unwrap();
    path
}

/// Attach a fixture file (`.thumb`, `.info`, `.fail`) to a fake image.
pub fn attach(image: &Path, suffix: &str, contents: &[u8]) -> PathBuf {
    let mut name = image.as_os_str().to_os_string();
    name.push(suffix);
    let path = PathBuf::from(name);
    fs::write(&path, contents).unwrap();
    path
}
