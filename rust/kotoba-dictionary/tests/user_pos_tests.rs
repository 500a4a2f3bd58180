use std::sync::Arc;

use kotoba_bytes::{Bytes, BytesMut};
use kotoba_common::Result;
use kotoba_dictionary::{
    DataManager, Token, UserPos, UserPosData, UserPosDictionary,
    read::token_array::{TOKEN_RECORD_SIZE, TokenRecord},
    user_dictionary::{UserEntry, expand_entries},
    write::{
        string_table_builder::StringTableBuilder,
        user_pos_builder::{ConjugationForm, PosDefinition, UserPosBuilder},
    },
};
use kotoba_testkit::data_gen::{generate_pos_set, generate_stems, reverse_records};

fn literal_scenario() -> UserPosData {
    let string_array = StringTableBuilder::serialize(["", "Noun", "Verb", "ed", "s"]).unwrap();
    let mut token_array = BytesMut::new();
    for record in [
        TokenRecord::new(1, 0, 0, 10),
        TokenRecord::new(1, 4, 4, 11),
        TokenRecord::new(2, 3, 3, 20),
    ] {
        record.encode_into(&mut token_array);
    }
    UserPosData::new(token_array.into_bytes(), string_array)
}

fn generated_dictionary(seed: u64, pos_count: usize) -> UserPos {
    let definitions = generate_pos_set(seed, pos_count, 6).into_iter().map(|pos| {
        pos.forms.into_iter().fold(PosDefinition::new(pos.name), |def, form| {
            def.with_form(ConjugationForm::new(
                form.key_suffix,
                form.value_suffix,
                form.conjugation_id,
            ))
        })
    });
    let data = UserPosBuilder::from_definitions(definitions)
        .unwrap()
        .finish()
        .unwrap();
    UserPos::from_data_manager(&data).unwrap()
}

fn token(key: &str, value: &str, pos_id: u16, conjugation_id: u16) -> Token {
    Token {
        key: key.to_string(),
        value: value.to_string(),
        pos_id,
        conjugation_id,
    }
}

#[test]
fn test_literal_scenario() {
    let user_pos = UserPos::from_data_manager(&literal_scenario()).unwrap();
    assert_eq!(user_pos.pos_list(), vec!["Noun", "Verb"]);
    assert_eq!(user_pos.pos_id("Verb"), Some(2));
    assert_eq!(user_pos.pos_id("Adj"), None);

    let mut out = Vec::new();
    assert!(user_pos.get_tokens("walk", "walk", "Noun", &mut out));
    assert_eq!(
        out,
        vec![token("walk", "walk", 1, 10), token("walks", "walks", 1, 11)]
    );

    let before = out.clone();
    assert!(!user_pos.get_tokens("walk", "walk", "Adjective", &mut out));
    assert_eq!(out, before);
}

#[test]
fn test_round_trip_identity() {
    for seed in [1, 2, 3] {
        let user_pos = generated_dictionary(seed, 40);
        let pos_list = user_pos.pos_list();
        let ids: Vec<u16> = user_pos.pos_index().distinct_pos_ids().collect();
        assert_eq!(pos_list.len(), 40);
        assert_eq!(pos_list.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for (name, &id) in pos_list.iter().zip(&ids) {
            assert_eq!(user_pos.pos_id(name), Some(id));
            assert_eq!(user_pos.string_table().get(id as usize).unwrap(), name.as_str());
        }
        let mut sorted = pos_list.clone();
        sorted.sort();
        assert_eq!(sorted, pos_list);
    }
}

#[test]
fn test_validity_consistency() {
    let user_pos = generated_dictionary(11, 25);
    let pos_list = user_pos.pos_list();
    for name in &pos_list {
        assert!(user_pos.is_valid_pos(name));
    }
    for s in user_pos.string_table().iter() {
        assert_eq!(
            user_pos.is_valid_pos(s),
            pos_list.iter().any(|p| p == s),
            "{s:?}"
        );
    }
    assert!(!user_pos.is_valid_pos("品詞9999"));
    assert!(!user_pos.is_valid_pos(""));
}

#[test]
fn test_range_correctness() {
    let user_pos = generated_dictionary(5, 60);
    let index = user_pos.pos_index();
    let tokens = user_pos.token_array();
    for pos_id in 0..=user_pos.string_table().len() as u16 {
        let range = index.record_range(pos_id);
        let expected: Vec<usize> = (0..tokens.len())
            .filter(|&i| tokens.pos_index_at(i) == Some(pos_id))
            .collect();
        let actual: Vec<usize> = range.clone().collect();
        assert_eq!(actual, expected, "pos_id {pos_id}");
        assert!(index.records(pos_id).all(|r| r.pos_index == pos_id));
    }
}

#[test]
fn test_prefix_law() {
    let user_pos = generated_dictionary(8, 30);
    let stems = generate_stems(8, 10);
    let suffixes: Vec<&str> = user_pos.string_table().iter().collect();
    for pos in user_pos.pos_list() {
        for stem in &stems {
            let mut tokens = Vec::new();
            assert!(user_pos.get_tokens(stem, stem, &pos, &mut tokens));
            let pos_id = user_pos.pos_id(&pos).unwrap();
            let records: Vec<_> = user_pos.pos_index().records(pos_id).collect();
            assert_eq!(tokens.len(), records.len());
            for (token, record) in tokens.iter().zip(&records) {
                assert!(token.key.starts_with(stem.as_str()));
                assert!(token.value.starts_with(stem.as_str()));
                assert_eq!(token.pos_id, pos_id);
                assert_eq!(token.conjugation_id, record.conjugation_id);
                let key_suffix = suffixes[record.key_suffix_index as usize];
                let value_suffix = suffixes[record.value_suffix_index as usize];
                assert_eq!(token.key, format!("{stem}{key_suffix}"));
                assert_eq!(token.value, format!("{stem}{value_suffix}"));
                if key_suffix.is_empty() {
                    assert_eq!(&token.key, stem);
                }
            }
        }
    }
}

#[test]
fn test_tokens_accumulate_across_queries() {
    let user_pos = UserPos::from_data_manager(&literal_scenario()).unwrap();
    let mut out = Vec::new();
    assert!(user_pos.get_tokens("walk", "walk", "Noun", &mut out));
    assert!(user_pos.get_tokens("walk", "walk", "Verb", &mut out));
    assert_eq!(out.len(), 3);
    assert_eq!(out[2], token("walked", "walked", 2, 20));

    let entries = [
        UserEntry::new("run", "run", "Verb"),
        UserEntry::new("run", "run", "Adverb"),
        UserEntry::new("cat", "cat", "Noun"),
    ];
    let matched = expand_entries(&user_pos, &entries, &mut out);
    assert_eq!(matched, 2);
    assert_eq!(out.len(), 6);
    assert_eq!(out[5], token("cats", "cats", 1, 11));
}

#[test]
fn test_sortedness_precondition() {
    let data = UserPosBuilder::from_definitions(
        generate_pos_set(3, 10, 3)
            .into_iter()
            .map(|pos| PosDefinition {
                name: pos.name,
                forms: pos
                    .forms
                    .into_iter()
                    .map(|f| ConjugationForm::new(f.key_suffix, f.value_suffix, f.conjugation_id))
                    .collect(),
            }),
    )
    .unwrap()
    .finish()
    .unwrap();
    assert!(UserPos::new(data.token_array.clone(), data.string_array.clone()).is_ok());

    let scrambled = Bytes::from(reverse_records(&data.token_array, TOKEN_RECORD_SIZE));
    let err = UserPos::new(scrambled, data.string_array).unwrap_err();
    assert!(err.is_invalid_format());
}

#[test]
fn test_concurrent_queries() {
    let user_pos = Arc::new(generated_dictionary(21, 50));
    let expected: Vec<(String, Vec<Token>)> = user_pos
        .pos_list()
        .into_iter()
        .map(|pos| {
            let mut tokens = Vec::new();
            user_pos.get_tokens("よみ", "読み", &pos, &mut tokens);
            (pos, tokens)
        })
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let user_pos = Arc::clone(&user_pos);
            let expected = &expected;
            scope.spawn(move || {
                for (pos, tokens) in expected {
                    let mut actual = Vec::new();
                    assert!(user_pos.get_tokens("よみ", "読み", pos, &mut actual));
                    assert_eq!(&actual, tokens);
                }
            });
        }
    });
}

#[test]
fn test_engine_outlives_provider() {
    struct Provider {
        data: UserPosData,
    }

    impl DataManager for Provider {
        fn user_pos_data(&self) -> Result<UserPosData> {
            Ok(self.data.clone())
        }
    }

    let provider = Provider {
        data: literal_scenario(),
    };
    let user_pos = UserPos::from_data_manager(&provider).unwrap();
    drop(provider);
    assert_eq!(user_pos.pos_list(), vec!["Noun", "Verb"]);
}

#[test]
fn test_scrambled_records_never_load() {
    let data = literal_scenario();
    let scrambled = Bytes::from(reverse_records(&data.token_array, TOKEN_RECORD_SIZE));
    let err = UserPos::new(scrambled.clone(), data.string_array.clone()).unwrap_err();
    assert!(err.is_invalid_format());

    let provider = UserPosData::new(scrambled, data.string_array);
    assert!(UserPos::from_data_manager(&provider).unwrap_err().is_invalid_format());
}

#[test]
fn test_definitions_from_json() {
    let definitions: Vec<PosDefinition> = serde_json::from_str(
        r#"[
            {
                "name": "動詞カ行五段",
                "forms": [
                    { "key_suffix": "く", "value_suffix": "く", "conjugation_id": 1 },
                    { "key_suffix": "かない", "value_suffix": "かない", "conjugation_id": 2 }
                ]
            },
            {
                "name": "名詞サ変",
                "forms": [
                    { "conjugation_id": 3 },
                    { "key_suffix": "する", "value_suffix": "為る", "conjugation_id": 4 }
                ]
            }
        ]"#,
    )
    .unwrap();
    let data = UserPosBuilder::from_definitions(definitions)
        .unwrap()
        .finish()
        .unwrap();
    let user_pos = UserPos::from_data_manager(&data).unwrap();

    let mut out = Vec::new();
    assert!(user_pos.get_tokens("べんきょう", "勉強", "名詞サ変", &mut out));
    let pos_id = user_pos.pos_id("名詞サ変").unwrap();
    assert_eq!(
        out,
        vec![
            token("べんきょう", "勉強", pos_id, 3),
            token("べんきょうする", "勉強為る", pos_id, 4),
        ]
    );
}
