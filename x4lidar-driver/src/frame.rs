use crate::constants::FRAME_MARKER;

/// Splits `chunk` on the two-byte sync marker. The carry left over from
/// the previous chunk is glued to the front of the first piece. The last
/// piece is always withheld as the new carry, since the read may have
/// stopped mid-frame; a chunk without any marker therefore yields no
/// frames and rides forward whole.
pub(crate) fn split_frames(chunk: &[u8], carry: &[u8]) -> (Vec<Vec<u8>>, Vec<u8>) {
    let mut pieces: Vec<&[u8]> = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + FRAME_MARKER.len() <= chunk.len() {
        if chunk[i..i + FRAME_MARKER.len()] == FRAME_MARKER {
            pieces.push(&chunk[start..i]);
            i += FRAME_MARKER.len();
            start = i;
        } else {
            i += 1;
        }
    }
    pieces.push(&chunk[start..]);

    let mut frames: Vec<Vec<u8>> = Vec::with_capacity(pieces.len());
    for (idx, piece) in pieces.iter().enumerate() {
        if idx == 0 {
            let mut first = carry.to_vec();
            first.extend_from_slice(piece);
            frames.push(first);
        } else {
            frames.push(piece.to_vec());
        }
    }
    let new_carry = frames.pop().unwrap_or_default();
    (frames, new_carry)
}
