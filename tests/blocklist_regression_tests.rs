#[cfg(test)]
mod blocklist_regression_tests {
    use std::io::Write;
    use std::net::Ipv4Addr;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::{Builder, NamedTempFile};

    use peer_bouncer::config::OutputFormat;
    use peer_bouncer::config_loader::{collect_sources, load_config};
    use peer_bouncer::ip::{
        decompose_ipv4_range, ipv4_range_to_cidr, is_valid_ipv4, is_valid_ipv6, normalize_cidr, AddressKind,
    };
    use peer_bouncer::orchestrator::process_sources;
    use peer_bouncer::parser::parse_blocklist_text;
    use peer_bouncer::report::{render, render_cidr_list};

    /// Sample in the style of a P2P-format "level1" list
    const LEVEL1_SAMPLE: &str = "\
# List distributed under the terms of the GPL
#
Example Telecom:1.2.4.0-1.2.4.255
Bogon range:0.0.0.0-0.255.255.255
Some Hoster: 203.0.113.17-203.0.113.42
v6 tunnel broker: 2001:db8:1234::/48
not an entry at all
Broken range:10.0.0.10-10.0.0.1
";

    #[test]
    fn test_comment_cidr_bogus_and_labelled_range() {
        let result = parse_blocklist_text("# comment\n\n10.0.0.0/24\nbogus-entry\nlabel: 1.2.3.4-1.2.3.4\n");

        let pairs: Vec<(&str, AddressKind)> = result
            .entries
            .iter()
            .map(|e| (e.normalized.as_str(), e.kind))
            .collect();
        assert_eq!(
            pairs,
            [("10.0.0.0/24", AddressKind::Ipv4), ("1.2.3.4/32", AddressKind::Ipv4)]
        );
        assert_eq!(result.rejected, ["bogus-entry"]);
    }

    #[test]
    fn test_level1_sample() {
        let result = parse_blocklist_text(LEVEL1_SAMPLE);
        let cidrs: Vec<&str> = result.entries.iter().map(|e| e.normalized.as_str()).collect();

        assert_eq!(
            cidrs,
            [
                "1.2.4.0/24",
                "0.0.0.0/8",
                "203.0.113.17/32",
                "203.0.113.18/31",
                "203.0.113.20/30",
                "203.0.113.24/29",
                "203.0.113.32/29",
                "203.0.113.40/31",
                "203.0.113.42/32",
                "2001:db8:1234::/48",
            ]
        );
        assert_eq!(result.rejected, ["not an entry at all", "Broken range:10.0.0.10-10.0.0.1"]);
        assert_eq!(result.entries[3].raw, "Some Hoster: 203.0.113.17-203.0.113.42");
    }

    #[test]
    fn test_every_normalized_entry_reparses_as_its_kind() {
        let result = parse_blocklist_text(LEVEL1_SAMPLE);
        for entry in &result.entries {
            let reparsed = normalize_cidr(&entry.normalized).expect("normalized entry must re-parse");
            assert_eq!(reparsed.text, entry.normalized);
            assert_eq!(reparsed.kind, entry.kind);
        }
    }

    #[test]
    fn test_valid_addresses_normalize_to_themselves() {
        for ip in ["192.168.1.1", "10.0.0.1", "255.255.255.255", "0.0.0.0"] {
            assert!(is_valid_ipv4(ip));
            let n = normalize_cidr(ip).unwrap();
            assert_eq!((n.text.as_str(), n.kind), (ip, AddressKind::Ipv4));
        }
        for ip in ["::1", "2001:db8::1", "fe80::1:2:3:4"] {
            assert!(is_valid_ipv6(ip));
            let n = normalize_cidr(ip).unwrap();
            assert_eq!((n.text.as_str(), n.kind), (ip, AddressKind::Ipv6));
        }
    }

    #[test]
    fn test_every_valid_prefix_accepted() {
        for prefix in 0..=32 {
            let cidr = format!("198.51.100.0/{}", prefix);
            assert_eq!(normalize_cidr(&cidr).map(|n| n.text), Some(cidr.clone()));
        }
        for prefix in 0..=128 {
            let cidr = format!("2001:db8::/{}", prefix);
            assert_eq!(normalize_cidr(&cidr).map(|n| n.text), Some(cidr.clone()));
        }
    }

    #[test]
    fn test_range_coverage_on_realistic_ranges() {
        let ranges = [
            ("192.168.1.5", "192.168.1.9"),
            ("1.2.3.4", "1.2.3.200"),
            ("10.0.0.1", "10.255.255.254"),
            ("0.0.0.0", "9.255.255.255"),
            ("100.64.0.0", "100.127.255.255"),
            ("223.255.255.0", "255.255.255.255"),
        ];

        for (start, end) in ranges {
            let s: Ipv4Addr = start.parse().unwrap();
            let e: Ipv4Addr = end.parse().unwrap();
            let blocks = decompose_ipv4_range(s, e).unwrap();

            let mut next = u64::from(u32::from(s));
            for block in &blocks {
                assert_eq!(u64::from(block.first()), next, "gap/overlap in {}-{}", start, end);
                next = u64::from(block.last()) + 1;
            }
            assert_eq!(next, u64::from(u32::from(e)) + 1, "{}-{} not covered", start, end);
            assert!(blocks.len() <= 62);

            let as_strings = ipv4_range_to_cidr(start, end).unwrap();
            let expected: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
            assert_eq!(as_strings, expected);
        }
    }

    #[test]
    fn test_idempotent_reparse() {
        let first = parse_blocklist_text(LEVEL1_SAMPLE);
        let rendered: String = first.entries.iter().map(|e| format!("{}\n", e.normalized)).collect();
        let second = parse_blocklist_text(&rendered);

        let pairs = |r: &peer_bouncer::parser::ParseResult| {
            r.entries
                .iter()
                .map(|e| (e.normalized.clone(), e.kind))
                .collect::<Vec<_>>()
        };
        assert_eq!(pairs(&first), pairs(&second));
        assert!(second.rejected.is_empty());
    }

    #[test]
    fn test_gzip_file_end_to_end() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(LEVEL1_SAMPLE.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut list_file = Builder::new().suffix(".p2p.gz").tempfile().unwrap();
        list_file.write_all(&compressed).unwrap();

        let yaml = format!(
            "output:\n  format: cidr\nsources:\n  - name: level1\n    path: \"{}\"\n",
            list_file.path().display()
        );
        let mut config_file = NamedTempFile::new().unwrap();
        write!(config_file, "{}", yaml).unwrap();

        let config = load_config(config_file.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Cidr);

        let sources = collect_sources(&config, &[]);
        let outcomes = process_sources(&sources, &config.fetch_options());
        assert_eq!(outcomes.len(), 1);

        let cidrs = render_cidr_list(&outcomes);
        assert!(cidrs.starts_with("1.2.4.0/24\n0.0.0.0/8\n"));
        assert!(cidrs.ends_with("2001:db8:1234::/48\n"));
        assert_eq!(cidrs.lines().count(), 10);

        let text = render(&outcomes, OutputFormat::Text, true).unwrap();
        assert!(text.contains("Valid Entries: 10"));
        assert!(text.contains("Invalid Lines: 2"));
    }

    #[test]
    fn test_invalid_utf8_file_reported_not_parsed() {
        let mut list_file = NamedTempFile::new().unwrap();
        list_file.write_all(&[b'1', b'.', b'2', 0xc3, 0x28]).unwrap();

        let sources = collect_sources(
            &Default::default(),
            &[list_file.path().display().to_string()],
        );
        let outcomes = process_sources(&sources, &Default::default());

        assert!(outcomes[0].parsed().is_none());
        assert!(outcomes[0].error().unwrap().contains("not UTF-8"));
    }
}
