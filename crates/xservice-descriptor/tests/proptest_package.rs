//! Property-based tests for package deduction

use proptest::prelude::*;
use xservice_descriptor::{FileDescriptorProto, deduce_generated_package, parse_go_package};

fn file(name: String, package: String) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name),
        package: Some(package),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn proptest_bare_go_package_has_no_import_path(name in "[a-z][a-z0-9_]{0,12}") {
        let parsed = parse_go_package(&name);

        prop_assert_eq!(parsed.import_path, None);
        prop_assert_eq!(parsed.name, name);
    }

    #[test]
    fn proptest_go_package_name_is_last_path_element(
        segments in prop::collection::vec("[a-z][a-z0-9]{0,8}", 1..5),
        last in "[a-z][a-z0-9]{0,8}",
    ) {
        let option = format!("{}/{last}", segments.join("/"));

        let parsed = parse_go_package(&option);

        prop_assert_eq!(parsed.import_path, Some(option.clone()));
        prop_assert_eq!(parsed.name, last);
    }

    #[test]
    fn proptest_same_package_everywhere_never_conflicts(
        package in "[a-z][a-z0-9]{0,10}",
        count in 1usize..5,
    ) {
        let files: Vec<FileDescriptorProto> = (0..count)
            .map(|i| file(format!("f{i}.proto"), package.clone()))
            .collect();
        let refs: Vec<&FileDescriptorProto> = files.iter().collect();

        let deduced = deduce_generated_package(&refs).unwrap();

        prop_assert_eq!(deduced, package);
    }
}
