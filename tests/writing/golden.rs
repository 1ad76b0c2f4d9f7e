#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use scrivener::formatting::Identity;
    use scrivener::language;
    use scrivener::rendering::render;
    use scrivener::writing::{Options, Writer};

    /// Golden test for the format command
    ///
    /// Every .json tree in samples/golden/ is written out and compared with
    /// the .sol file of the same name. If a file fails this test either the
    /// writer is wrong or the expected source is (perhaps because of a
    /// deliberate style change).

    fn show_diff(expected: &str, written: &str, file_path: &Path) {
        let expected_lines: Vec<&str> = expected
            .lines()
            .collect();
        let written_lines: Vec<&str> = written
            .lines()
            .collect();

        let max_lines = expected_lines
            .len()
            .max(written_lines.len());

        println!("\nDifferences found in file: {:?}", file_path);
        println!("--- Expected");
        println!("+++ Written");

        for i in 0..max_lines {
            let want = expected_lines
                .get(i)
                .unwrap_or(&"");
            let got = written_lines
                .get(i)
                .unwrap_or(&"");

            if want != got {
                println!("@@ Line {} @@", i + 1);
                println!("- {}", want);
                println!("+ {}", got);
            }
        }
    }

    fn write(file: &Path) -> String {
        let document = language::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));
        let writer = Writer::standard(Options::default());

        let mut output = render(&Identity, &writer, &document.tree, document.root)
            .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file, e));
        output.push('\n');
        output
    }

    #[test]
    fn ensure_identical_output() {
        let dir = Path::new("samples/golden");
        assert!(dir.exists(), "samples directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read samples directory");

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("json")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .json files found in samples directory");

        let mut failures = Vec::new();

        for file in &files {
            let expected = fs::read_to_string(file.with_extension("sol"))
                .unwrap_or_else(|e| panic!("Missing expected source for {:?}: {}", file, e));
            let written = write(file);

            if written != expected {
                show_diff(&expected, &written, file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!("{} of {} samples did not write as expected", failures.len(), files.len());
        }
    }
}
