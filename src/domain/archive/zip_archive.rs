use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("ZIPファイル '{}' を作成できません: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ファイル '{}' をZIPに追加できません: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' はファイル名を持たないためZIPに追加できません")]
    NoFileName(PathBuf),
    #[error("ZIPの書き込みに失敗しました: {0}")]
    Zip(#[from] ZipError),
    #[error("ZIPの書き込みに失敗しました: {0}")]
    Io(#[from] io::Error),
}

/// ディレクトリ構造を持たないフラットなZIPファイルを作成します。
///
/// 各エントリはファイルのベース名で追加されます。同じベース名のファイルが複数ある場合は
/// 後のファイルで上書きされます。既存の `destination` は切り詰められます。
///
/// # 戻り値
/// * `Ok(usize)`: アーカイブに書き込んだエントリ数。
pub fn create_flat_archive(destination: &Path, files: &[PathBuf]) -> Result<usize, ArchiveError> {
    let entries = flat_entries(files)?;

    let file = File::create(destination).map_err(|e| ArchiveError::Create {
        path: destination.to_path_buf(),
        source: e,
    })?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, path) in &entries {
        let mut input = File::open(path).map_err(|e| ArchiveError::Read {
            path: path.clone(),
            source: e,
        })?;
        zip.start_file(name.as_str(), options)?;
        io::copy(&mut input, &mut zip).map_err(|e| ArchiveError::Read {
            path: path.clone(),
            source: e,
        })?;
    }
    zip.finish()?;

    Ok(entries.len())
}

/// (エントリ名, パス) の一覧を作ります。順序は最初の出現順、内容は最後の出現を採用します。
fn flat_entries(files: &[PathBuf]) -> Result<Vec<(String, PathBuf)>, ArchiveError> {
    let mut entries: Vec<(String, PathBuf)> = Vec::with_capacity(files.len());
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ArchiveError::NoFileName(path.clone()))?;

        match index_by_name.get(&name) {
            Some(&i) => {
                tracing::warn!(
                    entry = %name,
                    replaced = %entries[i].1.display(),
                    by = %path.display(),
                    "ZIPエントリ名が重複したため上書きします"
                );
                entries[i].1 = path.clone();
            }
            None => {
                index_by_name.insert(name.clone(), entries.len());
                entries.push((name, path.clone()));
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut result = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).unwrap();
            result.push((entry.name().to_string(), buf));
        }
        result
    }

    #[test]
    fn entries_are_named_by_base_file_name() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let a = dir.path().join("a.png");
        let b = nested.join("b.png");
        fs::write(&a, b"aaa").unwrap();
        fs::write(&b, b"bbb").unwrap();

        let zip_path = dir.path().join("out.zip");
        let count = create_flat_archive(&zip_path, &[a, b]).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            read_entries(&zip_path),
            vec![
                ("a.png".to_string(), b"aaa".to_vec()),
                ("b.png".to_string(), b"bbb".to_vec())
            ]
        );
    }

    /// 同じベース名のファイルは後のものが残ることをテストします。
    #[test]
    fn colliding_names_keep_the_last_file() {
        let dir = tempdir().unwrap();
        let other = dir.path().join("other");
        fs::create_dir(&other).unwrap();
        let first = dir.path().join("favicon.ico");
        let second = other.join("favicon.ico");
        fs::write(&first, b"first").unwrap();
        fs::write(&second, b"second").unwrap();

        let zip_path = dir.path().join("out.zip");
        let count = create_flat_archive(&zip_path, &[first, second]).unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            read_entries(&zip_path),
            vec![("favicon.ico".to_string(), b"second".to_vec())]
        );
    }

    #[test]
    fn empty_file_list_creates_an_empty_archive() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("empty.zip");
        assert_eq!(create_flat_archive(&zip_path, &[]).unwrap(), 0);
        assert!(read_entries(&zip_path).is_empty());
    }

    #[test]
    fn missing_input_is_a_hard_error() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("out.zip");
        let result = create_flat_archive(&zip_path, &[dir.path().join("missing.png")]);
        assert!(matches!(result, Err(ArchiveError::Read { .. })));
    }

    #[test]
    fn unwritable_destination_is_a_hard_error() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("no_such_dir").join("out.zip");
        let result = create_flat_archive(&zip_path, &[]);
        assert!(matches!(result, Err(ArchiveError::Create { .. })));
    }
}
