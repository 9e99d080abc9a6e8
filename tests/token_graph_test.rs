use std::sync::Arc;

use eojeol::analysis::generator::{TokenGenerator, TokenGroup};
use eojeol::analysis::pos::{Pos, PosId};
use eojeol::analysis::pos_appender::{JoinPosAppender, PosAppender};
use eojeol::lattice::{Lattice, LatticeNode};

fn node(surface: &str, feature: &str, start: usize) -> LatticeNode {
    LatticeNode::parse(surface, feature, start, start + surface.len()).unwrap()
}

/// "철수가 국립중앙도서관에서 학교종이를 샀다."
fn sentence() -> Lattice {
    let text = "철수가 국립중앙도서관에서 학교종이를 샀다.";
    let mut nodes = Vec::new();
    let mut offset = 0;
    let mut push = |surface: &str, feature: &str, nodes: &mut Vec<LatticeNode>| {
        let start = text[offset..].find(surface).unwrap() + offset;
        nodes.push(node(surface, feature, start));
        offset = start + surface.len();
    };

    push("철수", "NNP,인명,F,철수,*,*,*,*", &mut nodes);
    push("가", "JKS,*,F,가,*,*,*,*", &mut nodes);
    push(
        "국립중앙도서관",
        "NNG,*,T,국립중앙도서관,Compound,*,*,국립/NNG/*+중앙/NNG/*+도서관/NNG/*",
        &mut nodes,
    );
    push("에서", "JKB,*,F,에서,*,*,*,*", &mut nodes);
    push(
        "학교종이",
        "NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*",
        &mut nodes,
    );
    push("를", "JKO,*,F,를,*,*,*,*", &mut nodes);
    push("샀", "VV+EP,*,T,샀,Inflect,VV,EP,사/VV/*+았/EP/*", &mut nodes);
    push("다", "EF,*,F,다,*,*,*,*", &mut nodes);
    push(".", "SF,*,*,*,*,*,*,*", &mut nodes);

    Lattice::from_morphemes(text, nodes)
}

/// "학교종이 울린다" with the compound standing alone.
fn bell_rings() -> Lattice {
    Lattice::from_morphemes(
        "학교종이 울린다",
        vec![
            node(
                "학교종이",
                "NNG,*,F,학교종이,Compound,*,*,학교/NNG/*+종이/NNG/*",
                0,
            ),
            node("울린다", "VV+EF,*,F,울린다,Inflect,VV,EF,울리/VV/*+ㄴ다/EF/*", 13),
        ],
    )
}

fn groups(lattice: Lattice, min_length: usize) -> Vec<TokenGroup> {
    let appender: Arc<dyn PosAppender> = Arc::new(JoinPosAppender::new());
    TokenGenerator::new(appender, min_length, lattice)
        .unwrap()
        .collect::<eojeol::error::Result<Vec<_>>>()
        .unwrap()
}

#[test]
fn test_group_heads_cover_text_without_spacing() {
    let lattice = sentence();
    let text = lattice.text().to_string();

    for min_length in [1, 3, 9999] {
        let heads: String = groups(lattice.clone(), min_length)
            .iter()
            .map(|group| group.front().unwrap().surface.clone())
            .collect();
        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(heads, expected);
    }
}

#[test]
fn test_offsets_match_surfaces() {
    let lattice = sentence();
    let text = lattice.text().to_string();

    for pos in groups(lattice, 3).iter().flatten() {
        assert!(pos.start_offset <= pos.end_offset);
        assert_eq!(&text[pos.start_offset..pos.end_offset], pos.surface);
        assert_eq!(pos.surface_length, pos.surface.chars().count());
    }
}

#[test]
fn test_graph_metadata_is_valid() {
    for group in groups(sentence(), 3) {
        let first = group.front().unwrap();
        assert_eq!(first.position_increment, 1);
        assert!(group.iter().all(|pos| pos.position_length >= 1));

        if group.len() > 1 {
            // atomic compound followed by its adjacent sub-nouns
            assert_eq!(first.position_length, group.len() - 1);
            let subs: Vec<&Pos> = group.iter().skip(1).collect();
            assert_eq!(subs[0].position_increment, 0);
            assert!(subs[1..].iter().all(|pos| pos.position_increment == 1));
            assert_eq!(subs[0].start_offset, first.start_offset);
            assert_eq!(subs.last().unwrap().end_offset, first.end_offset);
            for pair in subs.windows(2) {
                assert_eq!(pair[0].end_offset, pair[1].start_offset);
            }
        }
    }
}

#[test]
fn test_compound_followed_by_particle_is_fused() {
    let groups = groups(sentence(), 3);
    let surfaces: Vec<_> = groups
        .iter()
        .map(|g| g.front().unwrap().surface.as_str())
        .collect();

    assert_eq!(
        surfaces,
        vec!["철수가", "국립중앙도서관에서", "학교종이를", "샀다."]
    );
    assert!(groups.iter().all(|g| g.len() == 1));
    assert_eq!(groups[1][0].morphemes, "NNG+JKB");
    assert_eq!(groups[3][0].morphemes, "VV+EP+EF+SF");
    assert_eq!(groups[3][0].pos_id, PosId::Inflect);
}

#[test]
fn test_standalone_compound_is_decompounded() {
    let groups = groups(bell_rings(), 3);
    assert_eq!(groups.len(), 2);

    let compound: Vec<_> = groups[0].iter().map(|p| p.surface.as_str()).collect();
    assert_eq!(compound, vec!["학교종이", "학교", "종이"]);
    assert_eq!(groups[0][0].pos_id, PosId::Compound);
    assert_eq!(groups[0][1].pos_id, PosId::Nng);
    assert_eq!(groups[1][0].surface, "울린다");
    assert_eq!(groups[1][0].start_offset, 13);
}

#[test]
fn test_threshold_boundary() {
    // "학교종이" has four characters
    assert_eq!(groups(bell_rings(), 4)[0].len(), 3);
    assert_eq!(groups(bell_rings(), 5)[0].len(), 1);
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(groups(sentence(), 3), groups(sentence(), 3));
}

#[test]
fn test_generator_exhaustion() {
    let appender: Arc<dyn PosAppender> = Arc::new(JoinPosAppender::new());
    let mut generator = TokenGenerator::new(appender, 3, bell_rings()).unwrap();

    assert!(generator.next_eojeol_tokens().unwrap().is_some());
    assert!(generator.next_eojeol_tokens().unwrap().is_some());
    assert!(generator.next_eojeol_tokens().unwrap().is_none());
    assert!(generator.next_eojeol_tokens().unwrap().is_none());
}

#[test]
fn test_lattice_json_round_trip_feeds_generator() {
    let json = serde_json::to_string(&bell_rings()).unwrap();
    let lattice: Lattice = serde_json::from_str(&json).unwrap();
    assert_eq!(groups(lattice, 3).len(), 2);
}
