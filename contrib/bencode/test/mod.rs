use bencode::{ben_bytes, ben_int, ben_list, ben_map, decode, decode_response, Field};

#[test]
fn positive_ben_map_macro() {
    let result = (ben_map! {
        "key" => ben_bytes!("value")
    })
    .encode();

    assert_eq!("d3:key5:valuee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_ben_list_macro() {
    let result = (ben_list!(ben_int!(5))).encode();

    assert_eq!("li5ee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_ben_map_macro_keeps_the_written_order() {
    let result = (ben_map! {
        "z" => ben_int!(1),
        "a" => ben_int!(2)
    })
    .encode();

    assert_eq!("d1:zi1e1:ai2ee".as_bytes(), &result[..]); // cspell:disable-line
}

#[test]
fn positive_decode_what_the_macros_encode() {
    let value = ben_map! {
        "interval" => ben_int!(1800),
        "peers" => ben_bytes!(vec![127, 0, 0, 1, 0x1A, 0xE1]),
        "nested" => ben_list!(ben_bytes!("a"), ben_map!{ "x" => ben_int!(-1) })
    };

    assert_eq!(decode(&value.encode()).unwrap(), value);
}

#[test]
fn positive_decode_an_announce_response_built_with_the_macros() {
    let value = ben_map! {
        "interval" => ben_int!(1800),
        "peers" => ben_bytes!(vec![127, 0, 0, 1, 0x1A, 0xE1, 127, 0, 0])
    };

    let response = decode_response(&value.encode()).unwrap();

    assert_eq!(response.int("interval"), Some(1800));
    match response.get("peers") {
        Some(Field::Peers(peers)) => assert_eq!(peers.len(), 1),
        other => panic!("unexpected peers field: {other:?}"),
    }
}
