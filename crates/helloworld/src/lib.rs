/* 📖 # Why is helloworld its own crate?
Greeting text is shared by several services. Keeping it in a dependency-free library lets each
service link it without pulling in anything else.
*/

mod message;

pub use message::create_msg;
