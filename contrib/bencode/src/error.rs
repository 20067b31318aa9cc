use error_chain::error_chain;

error_chain! {
    types {
        BencodeParseError, BencodeParseErrorKind, BencodeParseResultExt, BencodeParseResult;
    }

    errors {
        BytesEmpty {
            pos: usize
         } {
            description("Incomplete Number Of Bytes")
            display("Incomplete Number Of Bytes At {:?}", pos)
        }
        InvalidByte {
            pos: usize
         } {
            description("Invalid Byte Found")
            display("Invalid Byte Found At {:?}", pos)
        }
        InvalidIntNoDelimiter {
            pos: usize
         } {
            description("Invalid Integer Found With No Delimiter")
            display("Invalid Integer Found With No Delimiter At {:?}", pos)
        }
        InvalidIntParseError {
            pos: usize
         } {
            description("Invalid Integer Found To Fail Parsing")
            display("Invalid Integer Found To Fail Parsing At {:?}", pos)
        }
        MissingTerminator {
            pos: usize
         } {
            description("Missing Terminating Byte")
            display("Missing Terminating Byte For Value Starting At {:?}", pos)
        }
        InvalidLengthNegative {
            pos: usize
         } {
            description("Invalid Byte Length Found As Negative")
            display("Invalid Byte Length Found As Negative At {:?}", pos)
        }
        InvalidLengthOverflow {
            pos: usize
         } {
            description("Invalid Byte Length Found To Overflow Buffer Length")
            display("Invalid Byte Length Found To Overflow Buffer Length At {:?}", pos)
        }
        InvalidRecursionExceeded {
            pos: usize,
            max: usize
        } {
            description("Invalid Recursion Limit Exceeded")
            display("Invalid Recursion Limit Exceeded At {:?} For Limit {:?}", pos, max)
        }
        NotADict {
            description("not a dict")
            display("not a dict")
        }
        InvalidExternalIpSize {
            size: usize
        } {
            description("invalid external IP size")
            display("invalid external IP size: {}", size)
        }
    }
}
